//! Declarative JSON schemas for domain records.
//!
//! Loading goes through [`Schema::load`], which validates a raw JSON body and
//! produces a record in one of three [`Load`] modes. Every failure is reported
//! per field in a single [`ValidationError`] rather than stopping at the first
//! one.
//!
//! Dumping is plain `serde::Serialize`: a record serializes to a JSON object
//! and a slice of records to an array.

use chrono::NaiveDate;
use serde_json::{Map, Value};

use crate::error::ValidationError;

pub const MISSING: &str = "Missing data for required field.";
pub const NULL: &str = "Field may not be null.";
pub const UNKNOWN_FIELD: &str = "Unknown field.";
pub const INVALID_INPUT: &str = "Invalid input type.";
pub const NOT_A_STRING: &str = "Not a valid string.";
pub const NOT_AN_INTEGER: &str = "Not a valid integer.";
pub const NOT_A_DATE: &str = "Not a valid date.";
pub const TOO_SHORT: &str = "Shorter than minimum length 1.";

/// How a payload is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Load<T> {
    /// Build a fresh record. Every required field must be supplied.
    New,
    /// Replace an existing record wholesale. Every required field must be
    /// supplied; optional fields left out of the body end up empty.
    Replace(T),
    /// Change only the fields present in the body, keeping the rest of the
    /// existing record.
    Partial(T),
}

impl<T> Load<T> {
    /// The record being replaced or patched, if any.
    pub const fn existing(&self) -> Option<&T> {
        match self {
            Self::New => None,
            Self::Replace(record) | Self::Partial(record) => Some(record),
        }
    }

    pub const fn is_partial(&self) -> bool {
        matches!(self, Self::Partial(_))
    }

    /// Hand back the existing record when its values must be carried over.
    pub fn into_partial(self) -> Option<T> {
        match self {
            Self::Partial(record) => Some(record),
            Self::New | Self::Replace(_) => None,
        }
    }
}

/// A record that can be loaded from a JSON body.
pub trait Schema: Sized {
    /// Validate `body` and build the resulting record.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] listing every offending field.
    fn load(body: &Value, mode: Load<Self>) -> Result<Self, ValidationError>;
}

/// Parser for a single field value.
pub type Parse<T> = fn(&Value) -> Result<T, &'static str>;

/// Field-by-field reader over a JSON object that accumulates errors.
pub struct Payload<'a> {
    object: &'a Map<String, Value>,
    partial: bool,
    errors: ValidationError,
}

impl<'a> Payload<'a> {
    /// Start reading `body`, which must be an object whose keys are all in
    /// `fields`. Unknown keys are recorded as errors but reading continues.
    ///
    /// # Errors
    ///
    /// Fails immediately when `body` is not a JSON object.
    pub fn new(body: &'a Value, fields: &[&str], partial: bool) -> Result<Self, ValidationError> {
        let Value::Object(object) = body else {
            return Err(ValidationError::single(
                ValidationError::SCHEMA,
                INVALID_INPUT,
            ));
        };

        let mut errors = ValidationError::default();
        for key in object.keys() {
            if !fields.contains(&key.as_str()) {
                errors.add(key.as_str(), UNKNOWN_FIELD);
            }
        }

        Ok(Self {
            object,
            partial,
            errors,
        })
    }

    /// Read a field that must hold a value.
    ///
    /// In partial mode a missing field yields `current` untouched.
    pub fn required<T>(&mut self, name: &str, parse: Parse<T>, current: Option<T>) -> Option<T> {
        match self.object.get(name) {
            None if self.partial => current,
            None => {
                self.errors.add(name, MISSING);
                None
            }
            Some(Value::Null) => {
                self.errors.add(name, NULL);
                None
            }
            Some(value) => self.parse(name, parse, value),
        }
    }

    /// Read a nullable field. `null` clears it.
    ///
    /// In partial mode a missing field yields `current` untouched.
    pub fn optional<T>(&mut self, name: &str, parse: Parse<T>, current: Option<T>) -> Option<T> {
        match self.object.get(name) {
            None if self.partial => current,
            None | Some(Value::Null) => None,
            Some(value) => self.parse(name, parse, value),
        }
    }

    /// Record a schema-specific failure against `name`.
    pub fn reject(&mut self, name: &str, message: impl Into<String>) {
        self.errors.add(name, message);
    }

    /// Return `record` if nothing failed along the way.
    ///
    /// # Errors
    ///
    /// Returns the accumulated [`ValidationError`] otherwise.
    pub fn finish<T>(self, record: T) -> Result<T, ValidationError> {
        if self.errors.is_empty() {
            Ok(record)
        } else {
            Err(self.errors)
        }
    }

    /// Give up and return whatever was recorded.
    #[must_use]
    pub fn into_errors(self) -> ValidationError {
        self.errors
    }

    fn parse<T>(&mut self, name: &str, parse: Parse<T>, value: &Value) -> Option<T> {
        match parse(value) {
            Ok(parsed) => Some(parsed),
            Err(message) => {
                self.errors.add(name, message);
                None
            }
        }
    }
}

/// Any JSON string.
///
/// # Errors
///
/// Fails with [`NOT_A_STRING`] for non-string values.
pub fn text(value: &Value) -> Result<String, &'static str> {
    value.as_str().map(str::to_owned).ok_or(NOT_A_STRING)
}

/// A JSON string with at least one character.
///
/// # Errors
///
/// Fails with [`NOT_A_STRING`] or [`TOO_SHORT`].
pub fn non_empty_text(value: &Value) -> Result<String, &'static str> {
    let text = text(value)?;
    if text.is_empty() {
        return Err(TOO_SHORT);
    }
    Ok(text)
}

/// A JSON integer, or a string holding one.
///
/// # Errors
///
/// Fails with [`NOT_AN_INTEGER`].
pub fn integer(value: &Value) -> Result<i64, &'static str> {
    match value {
        Value::Number(number) => number.as_i64().ok_or(NOT_AN_INTEGER),
        Value::String(text) => text.trim().parse().map_err(|_| NOT_AN_INTEGER),
        _ => Err(NOT_AN_INTEGER),
    }
}

/// An ISO-8601 calendar date (`YYYY-MM-DD`).
///
/// # Errors
///
/// Fails with [`NOT_A_DATE`].
pub fn date(value: &Value) -> Result<NaiveDate, &'static str> {
    let text = value.as_str().ok_or(NOT_A_DATE)?;
    NaiveDate::parse_from_str(text, "%Y-%m-%d").map_err(|_| NOT_A_DATE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const FIELDS: &[&str] = &["name", "count"];

    #[test]
    fn should_reject_non_object_body() {
        let Err(err) = Payload::new(&json!([1, 2]), FIELDS, false) else {
            panic!("array body must be rejected");
        };
        assert_eq!(
            err.messages(ValidationError::SCHEMA),
            Some(&[INVALID_INPUT.to_string()][..])
        );
    }

    #[test]
    fn should_flag_unknown_fields() {
        let body = json!({"name": "a", "colour": "red"});
        let payload = Payload::new(&body, FIELDS, false).unwrap();
        let err = payload.into_errors();
        assert_eq!(err.messages("colour"), Some(&[UNKNOWN_FIELD.to_string()][..]));
    }

    #[test]
    fn should_report_missing_required_field_outside_partial_mode() {
        let body = json!({});
        let mut payload = Payload::new(&body, FIELDS, false).unwrap();
        let name = payload.required("name", text, Some("kept".to_string()));
        assert!(name.is_none());
        assert_eq!(
            payload.into_errors().messages("name"),
            Some(&[MISSING.to_string()][..])
        );
    }

    #[test]
    fn should_keep_current_value_in_partial_mode() {
        let body = json!({});
        let mut payload = Payload::new(&body, FIELDS, true).unwrap();
        let name = payload.required("name", text, Some("kept".to_string()));
        let count = payload.optional("count", integer, Some(3));
        assert_eq!(name.as_deref(), Some("kept"));
        assert_eq!(count, Some(3));
        assert!(payload.finish(()).is_ok());
    }

    #[test]
    fn should_clear_optional_field_on_null() {
        let body = json!({"count": null});
        let mut payload = Payload::new(&body, FIELDS, true).unwrap();
        assert_eq!(payload.optional("count", integer, Some(3)), None);
        assert!(payload.finish(()).is_ok());
    }

    #[test]
    fn should_refuse_null_for_required_field() {
        let body = json!({"name": null});
        let mut payload = Payload::new(&body, FIELDS, true).unwrap();
        assert!(payload.required("name", text, None).is_none());
        assert_eq!(
            payload.into_errors().messages("name"),
            Some(&[NULL.to_string()][..])
        );
    }

    #[test]
    fn should_parse_integers_from_numbers_and_strings() {
        assert_eq!(integer(&json!(1992)), Ok(1992));
        assert_eq!(integer(&json!("1992")), Ok(1992));
        assert_eq!(integer(&json!(19.5)), Err(NOT_AN_INTEGER));
        assert_eq!(integer(&json!(true)), Err(NOT_AN_INTEGER));
    }

    #[test]
    fn should_parse_iso_dates_only() {
        assert_eq!(
            date(&json!("2012-08-29")),
            Ok(NaiveDate::from_ymd_opt(2012, 8, 29).unwrap())
        );
        assert_eq!(date(&json!("29/08/2012")), Err(NOT_A_DATE));
        assert_eq!(date(&json!(20_120_829)), Err(NOT_A_DATE));
    }

    #[test]
    fn should_reject_empty_text_where_required() {
        assert_eq!(non_empty_text(&json!("")), Err(TOO_SHORT));
        assert_eq!(non_empty_text(&json!(5)), Err(NOT_A_STRING));
    }
}
