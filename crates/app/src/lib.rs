//! # paralympics-app
//!
//! Application layer: use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `RegionRepository`: CRUD for regions, keyed by NOC code
//!   - `EventRepository`: CRUD for events, keyed by generated id
//! - Define **driving/inbound ports** as use-case structs:
//!   - `RegionService`: list, get, create, upsert, patch, delete
//!   - `EventService`: list, get, create, patch, delete
//! - Run request bodies through the domain schemas in the right load mode and
//!   enforce cross-record rules (events must reference an existing region)
//!
//! ## Dependency rule
//! Depends on `paralympics-domain` only.
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod ports;
pub mod services;
