//! Storage port: repository traits for persistence.
//!
//! Lookups come in two flavours. `find` tolerates absence and returns `None`.
//! `update` and `delete` must hit exactly one row and fail with
//! [`ParalympicsError::NotFound`] otherwise. Every mutating call is atomic.

use std::future::Future;

use paralympics_domain::error::ParalympicsError;
use paralympics_domain::event::{Event, EventDetails};
use paralympics_domain::id::{EventId, Noc};
use paralympics_domain::region::Region;

/// Repository for persisting and querying [`Region`]s.
pub trait RegionRepository {
    /// Insert a new region.
    ///
    /// Fails with [`ParalympicsError::Conflict`] when the NOC is taken.
    fn create(
        &self,
        region: Region,
    ) -> impl Future<Output = Result<Region, ParalympicsError>> + Send;

    /// Get a region by NOC code, if it exists.
    fn find(
        &self,
        noc: Noc,
    ) -> impl Future<Output = Result<Option<Region>, ParalympicsError>> + Send;

    /// Get all regions, ordered by NOC code.
    fn get_all(&self) -> impl Future<Output = Result<Vec<Region>, ParalympicsError>> + Send;

    /// Overwrite every column of an existing region.
    fn update(
        &self,
        region: Region,
    ) -> impl Future<Output = Result<Region, ParalympicsError>> + Send;

    /// Delete a region.
    ///
    /// Fails with [`ParalympicsError::Conflict`] while events still reference it.
    fn delete(&self, noc: Noc) -> impl Future<Output = Result<(), ParalympicsError>> + Send;
}

/// Repository for persisting and querying [`Event`]s.
pub trait EventRepository {
    /// Insert a new event and return it with its generated id.
    fn create(
        &self,
        details: EventDetails,
    ) -> impl Future<Output = Result<Event, ParalympicsError>> + Send;

    /// Get an event by id, if it exists.
    fn find(
        &self,
        id: EventId,
    ) -> impl Future<Output = Result<Option<Event>, ParalympicsError>> + Send;

    /// Get all events, ordered by id.
    fn get_all(&self) -> impl Future<Output = Result<Vec<Event>, ParalympicsError>> + Send;

    /// Overwrite every column of an existing event.
    fn update(&self, event: Event) -> impl Future<Output = Result<Event, ParalympicsError>> + Send;

    /// Delete an event.
    fn delete(&self, id: EventId) -> impl Future<Output = Result<(), ParalympicsError>> + Send;
}
