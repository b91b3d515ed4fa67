//! # paralympics-domain
//!
//! Pure domain model for the paralympics API.
//!
//! ## Responsibilities
//! - Foundational types: key newtypes and the error taxonomy
//! - Define **Regions** (National Olympic Committees, keyed by NOC code)
//! - Define **Events** (editions of the Games, each hosted in one region)
//! - Define the **schema layer** that validates JSON bodies into records in
//!   create, replace, or partial-update mode
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod schema;

pub mod event;
pub mod region;
