//! Shared application state for axum handlers.

use std::sync::Arc;

use paralympics_app::ports::{EventRepository, RegionRepository};
use paralympics_app::services::event_service::EventService;
use paralympics_app::services::region_service::RegionService;

/// Application state shared across all axum handlers.
///
/// Generic over the region and event repositories to avoid dynamic dispatch.
/// `Clone` is implemented manually so the repositories themselves do not need
/// to be `Clone`; only the `Arc` wrappers are cloned.
pub struct AppState<RR, ER> {
    /// Region CRUD service.
    pub region_service: Arc<RegionService<RR>>,
    /// Event CRUD service.
    pub event_service: Arc<EventService<ER, RR>>,
}

impl<RR, ER> Clone for AppState<RR, ER> {
    fn clone(&self) -> Self {
        Self {
            region_service: Arc::clone(&self.region_service),
            event_service: Arc::clone(&self.event_service),
        }
    }
}

impl<RR, ER> AppState<RR, ER>
where
    RR: RegionRepository + Send + Sync + 'static,
    ER: EventRepository + Send + Sync + 'static,
{
    /// Create a new application state from service instances.
    pub fn new(region_service: RegionService<RR>, event_service: EventService<ER, RR>) -> Self {
        Self {
            region_service: Arc::new(region_service),
            event_service: Arc::new(event_service),
        }
    }
}
