//! Storage-specific error type wrapping sqlx errors.

use paralympics_domain::error::{ConflictError, ParalympicsError};

/// Errors originating from the `SQLite` storage layer.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// A query or connection failed.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Failed to run migrations.
    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

impl StorageError {
    /// Whether the database rejected the write on a unique or foreign-key
    /// constraint.
    fn is_constraint_violation(&self) -> bool {
        match self {
            Self::Database(sqlx::Error::Database(err)) => {
                err.is_unique_violation() || err.is_foreign_key_violation()
            }
            _ => false,
        }
    }
}

impl From<StorageError> for ParalympicsError {
    fn from(err: StorageError) -> Self {
        if err.is_constraint_violation() {
            return ConflictError::Constraint.into();
        }
        Self::Storage(Box::new(err))
    }
}
