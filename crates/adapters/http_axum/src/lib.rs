//! # paralympics-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve the JSON API over `/regions` and `/events`
//! - Map HTTP requests into application service calls (driving adapter)
//! - Map service results and [`ParalympicsError`] into status codes and JSON
//!   bodies, once, in [`error::ApiError`]
//!
//! ## Dependency rule
//! Depends on `paralympics-app` (for port traits and services) and
//! `paralympics-domain` (for the records it serializes). Never leaks axum
//! types into the domain.
//!
//! [`ParalympicsError`]: paralympics_domain::error::ParalympicsError

pub mod api;
pub mod error;
pub mod router;
pub mod state;
