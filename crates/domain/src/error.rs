//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`ParalympicsError`] via `From`, so the HTTP adapter only has one enum to
//! map onto status codes.

use std::fmt;

use serde::ser::{Serialize, SerializeMap, Serializer};

/// Top-level error returned by services and repositories.
#[derive(Debug, thiserror::Error)]
pub enum ParalympicsError {
    #[error("validation error")]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    #[error(transparent)]
    Conflict(#[from] ConflictError),

    #[error("storage error")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Field-level validation failures, keyed by the field's wire name.
///
/// Serializes as a plain `{ field: [message, ...] }` map. Fields appear in
/// the order they first failed, which is the schema's declaration order, and
/// messages for a field keep the order in which they were recorded.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ValidationError {
    fields: Vec<(String, Vec<String>)>,
}

impl ValidationError {
    /// Key used for errors that concern the payload as a whole.
    pub const SCHEMA: &'static str = "_schema";

    /// Build an error holding a single message for `field`.
    #[must_use]
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut err = Self::default();
        err.add(field, message);
        err
    }

    /// Record one more message against `field`.
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        let field = field.into();
        let message = message.into();
        match self.fields.iter_mut().find(|(name, _)| *name == field) {
            Some((_, messages)) => messages.push(message),
            None => self.fields.push((field, vec![message])),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Messages recorded for `field`, if any.
    #[must_use]
    pub fn messages(&self, field: &str) -> Option<&[String]> {
        self.fields
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, messages)| messages.as_slice())
    }

    /// Iterate over the names of the fields that failed, in failure order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }
}

impl Serialize for ValidationError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (field, messages) in &self.fields {
            map.serialize_entry(field, messages)?;
        }
        map.end()
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid fields: ")?;
        for (idx, field) in self.fields().enumerate() {
            if idx > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{field}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// A lookup by primary key matched no row.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} {id} not found")]
pub struct NotFoundError {
    pub entity: &'static str,
    pub id: String,
}

/// The write would break a uniqueness or referential constraint.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConflictError {
    #[error("{entity} {id} already exists")]
    AlreadyExists { entity: &'static str, id: String },

    #[error("{entity} {id} is still referenced by {count} {referrer}(s)")]
    StillReferenced {
        entity: &'static str,
        id: String,
        referrer: &'static str,
        count: i64,
    },

    #[error("the write violates a referential constraint")]
    Constraint,
}
