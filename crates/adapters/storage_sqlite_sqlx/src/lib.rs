//! # paralympics-adapter-storage-sqlite-sqlx
//!
//! `SQLite` persistence adapter using [sqlx](https://docs.rs/sqlx).
//!
//! ## Responsibilities
//! - Implement the repository port traits defined in `paralympics-app::ports::storage`
//! - Manage `SQLite` connection pool lifecycle
//! - Run database migrations (using sqlx embedded migrations)
//! - Map between domain types and database rows
//! - Wrap every write in its own transaction
//!
//! ## Dependency rule
//! Depends on `paralympics-app` (for port traits) and `paralympics-domain` (for domain types).
//! The `app` and `domain` crates must never reference this adapter.

mod error;
mod event_repo;
mod pool;
mod region_repo;

pub use error::StorageError;
pub use event_repo::SqliteEventRepository;
pub use pool::{Config, Database};
pub use region_repo::SqliteRegionRepository;
