//! JSON REST API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod events;
#[allow(clippy::missing_errors_doc)]
pub mod regions;

use axum::Router;
use axum::routing::get;
use serde::Serialize;

use paralympics_app::ports::{EventRepository, RegionRepository};

use crate::state::AppState;

/// Confirmation body returned by mutating endpoints.
#[derive(Debug, Serialize)]
pub struct Message {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
}

impl Message {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            id: None,
        }
    }
}

/// Build the API routes.
pub fn routes<RR, ER>() -> Router<AppState<RR, ER>>
where
    RR: RegionRepository + Send + Sync + 'static,
    ER: EventRepository + Send + Sync + 'static,
{
    Router::new()
        // Regions
        .route(
            "/regions",
            get(regions::list::<RR, ER>).post(regions::create::<RR, ER>),
        )
        .route(
            "/regions/{code}",
            get(regions::get::<RR, ER>)
                .put(regions::replace::<RR, ER>)
                .patch(regions::patch::<RR, ER>)
                .delete(regions::delete::<RR, ER>),
        )
        // Events
        .route(
            "/events",
            get(events::list::<RR, ER>).post(events::create::<RR, ER>),
        )
        .route(
            "/events/{id}",
            get(events::get::<RR, ER>)
                .patch(events::patch::<RR, ER>)
                .delete(events::delete::<RR, ER>),
        )
}
