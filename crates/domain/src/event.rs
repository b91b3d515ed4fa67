//! Event: one edition of the Paralympic Games, hosted in a region.

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::Value;

use crate::error::ValidationError;
use crate::id::{EventId, Noc};
use crate::schema::{self, Load, Payload, Schema};

/// Loadable fields. `id` is assigned by the store and never accepted.
const FIELDS: &[&str] = &[
    "type",
    "year",
    "country",
    "host",
    "NOC",
    "start",
    "end",
    "duration",
    "disabilities_included",
    "countries",
    "events",
    "sports",
    "participants_m",
    "participants_f",
    "participants",
    "highlights",
    "URL",
];

/// A stored event together with its identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Event {
    pub id: EventId,
    #[serde(flatten)]
    pub details: EventDetails,
}

/// Everything about an event except its identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventDetails {
    /// `summer` or `winter` games.
    #[serde(rename = "type")]
    pub kind: String,
    pub year: i64,
    pub country: String,
    /// Host city.
    pub host: String,
    /// Region the event took place in.
    #[serde(rename = "NOC")]
    pub noc: Noc,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disabilities_included: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub countries: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub events: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sports: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub participants_m: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub participants_f: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub participants: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlights: Option<String>,
    #[serde(rename = "URL", skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl EventDetails {
    /// Details with only the required fields set.
    #[must_use]
    pub fn new(
        kind: impl Into<String>,
        year: i64,
        country: impl Into<String>,
        host: impl Into<String>,
        noc: Noc,
    ) -> Self {
        Self {
            kind: kind.into(),
            year,
            country: country.into(),
            host: host.into(),
            noc,
            start: None,
            end: None,
            duration: None,
            disabilities_included: None,
            countries: None,
            events: None,
            sports: None,
            participants_m: None,
            participants_f: None,
            participants: None,
            highlights: None,
            url: None,
        }
    }
}

impl Schema for EventDetails {
    fn load(body: &Value, mode: Load<Self>) -> Result<Self, ValidationError> {
        let mut payload = Payload::new(body, FIELDS, mode.is_partial())?;
        let current = mode.into_partial();
        let current = current.as_ref();

        let kind = payload.required(
            "type",
            schema::non_empty_text,
            current.map(|c| c.kind.clone()),
        );
        let year = payload.required("year", schema::integer, current.map(|c| c.year));
        let country = payload.required(
            "country",
            schema::non_empty_text,
            current.map(|c| c.country.clone()),
        );
        let host = payload.required(
            "host",
            schema::non_empty_text,
            current.map(|c| c.host.clone()),
        );
        let noc = payload.required(
            "NOC",
            |value| schema::non_empty_text(value).map(Noc::new),
            current.map(|c| c.noc.clone()),
        );
        let start = payload.optional("start", schema::date, current.and_then(|c| c.start));
        let end = payload.optional("end", schema::date, current.and_then(|c| c.end));
        let duration = payload.optional(
            "duration",
            schema::integer,
            current.and_then(|c| c.duration),
        );
        let disabilities_included = payload.optional(
            "disabilities_included",
            schema::text,
            current.and_then(|c| c.disabilities_included.clone()),
        );
        let countries =
            payload.optional("countries", schema::integer, current.and_then(|c| c.countries));
        let events = payload.optional("events", schema::integer, current.and_then(|c| c.events));
        let sports = payload.optional("sports", schema::integer, current.and_then(|c| c.sports));
        let participants_m = payload.optional(
            "participants_m",
            schema::integer,
            current.and_then(|c| c.participants_m),
        );
        let participants_f = payload.optional(
            "participants_f",
            schema::integer,
            current.and_then(|c| c.participants_f),
        );
        let participants = payload.optional(
            "participants",
            schema::integer,
            current.and_then(|c| c.participants),
        );
        let highlights = payload.optional(
            "highlights",
            schema::text,
            current.and_then(|c| c.highlights.clone()),
        );
        let url = payload.optional("URL", schema::text, current.and_then(|c| c.url.clone()));

        let (Some(kind), Some(year), Some(country), Some(host), Some(noc)) =
            (kind, year, country, host, noc)
        else {
            return Err(payload.into_errors());
        };

        payload.finish(Self {
            kind,
            year,
            country,
            host,
            noc,
            start,
            end,
            duration,
            disabilities_included,
            countries,
            events,
            sports,
            participants_m,
            participants_f,
            participants,
            highlights,
            url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{MISSING, NOT_A_DATE, NOT_AN_INTEGER, UNKNOWN_FIELD};
    use serde_json::json;

    fn london() -> EventDetails {
        EventDetails {
            participants: Some(4237),
            ..EventDetails::new("summer", 2012, "UK", "London", Noc::from("GBR"))
        }
    }

    fn message(err: &ValidationError, field: &str) -> Vec<String> {
        err.messages(field).map(<[String]>::to_vec).unwrap_or_default()
    }

    #[test]
    fn should_load_new_event_with_optional_fields() {
        let details = EventDetails::load(
            &json!({
                "type": "summer",
                "year": 2012,
                "country": "UK",
                "host": "London",
                "NOC": "GBR",
                "start": "2012-08-29",
                "end": "2012-09-09",
                "participants": "4237",
                "URL": "https://www.paralympic.org/london-2012"
            }),
            Load::New,
        )
        .unwrap();

        assert_eq!(details.year, 2012);
        assert_eq!(details.start, NaiveDate::from_ymd_opt(2012, 8, 29));
        assert_eq!(details.participants, Some(4237));
        assert_eq!(
            details.url.as_deref(),
            Some("https://www.paralympic.org/london-2012")
        );
        assert!(details.highlights.is_none());
    }

    #[test]
    fn should_name_missing_required_fields() {
        let err = EventDetails::load(&json!({"type": "winter", "year": 2010}), Load::New)
            .unwrap_err();
        assert_eq!(message(&err, "country"), vec![MISSING]);
        assert_eq!(message(&err, "host"), vec![MISSING]);
        assert_eq!(message(&err, "NOC"), vec![MISSING]);
        assert!(err.messages("type").is_none());
    }

    #[test]
    fn should_report_missing_fields_in_declaration_order() {
        let err = EventDetails::load(&json!({}), Load::New).unwrap_err();
        assert_eq!(
            err.fields().collect::<Vec<_>>(),
            vec!["type", "year", "country", "host", "NOC"]
        );
    }

    #[test]
    fn should_reject_client_supplied_id() {
        let err = EventDetails::load(&json!({"id": 3}), Load::Partial(london())).unwrap_err();
        assert_eq!(message(&err, "id"), vec![UNKNOWN_FIELD]);
    }

    #[test]
    fn should_report_bad_types() {
        let err = EventDetails::load(
            &json!({"year": "two thousand", "start": "soon"}),
            Load::Partial(london()),
        )
        .unwrap_err();
        assert_eq!(message(&err, "year"), vec![NOT_AN_INTEGER]);
        assert_eq!(message(&err, "start"), vec![NOT_A_DATE]);
    }

    #[test]
    fn should_patch_only_supplied_fields() {
        let details = EventDetails::load(
            &json!({"highlights": "Record crowds", "participants": null}),
            Load::Partial(london()),
        )
        .unwrap();

        assert_eq!(details.highlights.as_deref(), Some("Record crowds"));
        assert!(details.participants.is_none());
        assert_eq!(details.host, "London");
        assert_eq!(details.year, 2012);
    }

    #[test]
    fn should_dump_id_alongside_details() {
        let event = Event {
            id: EventId::new(5),
            details: london(),
        };
        assert_eq!(
            serde_json::to_value(&event).unwrap(),
            json!({
                "id": 5,
                "type": "summer",
                "year": 2012,
                "country": "UK",
                "host": "London",
                "NOC": "GBR",
                "participants": 4237
            })
        );
    }
}
