//! Region: a National Olympic Committee and the territory it represents.

use serde::Serialize;
use serde_json::Value;

use crate::error::ValidationError;
use crate::id::Noc;
use crate::schema::{self, Load, Payload, Schema};

pub const NOC_IMMUTABLE: &str = "NOC cannot be changed.";

const FIELDS: &[&str] = &["NOC", "region", "notes"];

/// A region keyed by its NOC code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Region {
    #[serde(rename = "NOC")]
    pub noc: Noc,
    pub region: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

fn parse_noc(value: &Value) -> Result<Noc, &'static str> {
    schema::non_empty_text(value).map(Noc::new)
}

impl Schema for Region {
    fn load(body: &Value, mode: Load<Self>) -> Result<Self, ValidationError> {
        let key = mode.existing().map(|existing| existing.noc.clone());
        let mut payload = Payload::new(body, FIELDS, mode.is_partial())?;

        let (current_noc, current_region, current_notes) = match mode.into_partial() {
            Some(Self { noc, region, notes }) => (Some(noc), Some(region), notes),
            None => (None, None, None),
        };

        let noc = payload.required("NOC", parse_noc, current_noc);
        let region = payload.required("region", schema::non_empty_text, current_region);
        let notes = payload.optional("notes", schema::text, current_notes);

        if let (Some(key), Some(noc)) = (&key, &noc)
            && key != noc
        {
            payload.reject("NOC", NOC_IMMUTABLE);
        }

        let (Some(noc), Some(region)) = (noc, region) else {
            return Err(payload.into_errors());
        };
        payload.finish(Self { noc, region, notes })
    }
}
