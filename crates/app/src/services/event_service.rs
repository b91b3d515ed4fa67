//! Event service: use-cases for managing events.

use serde_json::Value;

use paralympics_domain::error::{NotFoundError, ParalympicsError, ValidationError};
use paralympics_domain::event::{Event, EventDetails};
use paralympics_domain::id::{EventId, Noc};
use paralympics_domain::schema::{Load, Schema};

use crate::ports::{EventRepository, RegionRepository};

/// Application service for event CRUD operations.
///
/// Holds a region repository as well, to check that every event points at a
/// region that exists.
pub struct EventService<E, R> {
    events: E,
    regions: R,
}

impl<E, R> EventService<E, R>
where
    E: EventRepository,
    R: RegionRepository,
{
    /// Create a new service backed by the given repositories.
    pub fn new(events: E, regions: R) -> Self {
        Self { events, regions }
    }

    /// List all events.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn list_events(&self) -> Result<Vec<Event>, ParalympicsError> {
        self.events.get_all().await
    }

    /// Look up an event by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`ParalympicsError::NotFound`] when no event with `id` exists,
    /// or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn get_event(&self, id: EventId) -> Result<Event, ParalympicsError> {
        self.events.find(id).await?.ok_or_else(|| {
            NotFoundError {
                entity: "Event",
                id: id.to_string(),
            }
            .into()
        })
    }

    /// Validate `body` as a new event and insert it.
    ///
    /// # Errors
    ///
    /// Returns [`ParalympicsError::Validation`] if the body is invalid or its
    /// NOC names no region, or a storage error.
    #[tracing::instrument(skip(self, body))]
    pub async fn create_event(&self, body: &Value) -> Result<Event, ParalympicsError> {
        let details = EventDetails::load(body, Load::New)?;
        self.ensure_region(&details.noc).await?;
        let event = self.events.create(details).await?;
        tracing::debug!(id = %event.id, "event created");
        Ok(event)
    }

    /// Apply the fields present in `body` to an existing event and return
    /// the stored result.
    ///
    /// # Errors
    ///
    /// Returns [`ParalympicsError::NotFound`] when no event with `id` exists,
    /// [`ParalympicsError::Validation`] if the body is invalid, or a storage
    /// error from the repository.
    #[tracing::instrument(skip(self, body))]
    pub async fn patch_event(&self, id: EventId, body: &Value) -> Result<Event, ParalympicsError> {
        let existing = self.get_event(id).await?;
        let previous_noc = existing.details.noc.clone();

        let details = EventDetails::load(body, Load::Partial(existing.details))?;
        if details.noc != previous_noc {
            self.ensure_region(&details.noc).await?;
        }

        self.events.update(Event { id, details }).await?;
        self.get_event(id).await
    }

    /// Delete an event by id.
    ///
    /// # Errors
    ///
    /// Returns [`ParalympicsError::NotFound`] when no event with `id` exists,
    /// or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn delete_event(&self, id: EventId) -> Result<(), ParalympicsError> {
        self.events.delete(id).await
    }

    async fn ensure_region(&self, noc: &Noc) -> Result<(), ParalympicsError> {
        if self.regions.find(noc.clone()).await?.is_none() {
            let message = format!("No region with NOC= {noc}.");
            return Err(ValidationError::single("NOC", message).into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::span_log::SpanNames;
    use paralympics_domain::region::Region;
    use paralympics_domain::schema::{MISSING, UNKNOWN_FIELD};
    use serde_json::json;
    use std::collections::BTreeMap;
    use std::future::Future;
    use std::sync::Mutex;

    #[derive(Default)]
    struct InMemoryEventRepo {
        store: Mutex<BTreeMap<EventId, Event>>,
    }

    fn not_found(id: EventId) -> ParalympicsError {
        NotFoundError {
            entity: "Event",
            id: id.to_string(),
        }
        .into()
    }

    impl EventRepository for InMemoryEventRepo {
        fn create(
            &self,
            details: EventDetails,
        ) -> impl Future<Output = Result<Event, ParalympicsError>> + Send {
            let mut store = self.store.lock().unwrap();
            let next = store.keys().next_back().map_or(1, |id| id.get() + 1);
            let event = Event {
                id: EventId::new(next),
                details,
            };
            store.insert(event.id, event.clone());
            async { Ok(event) }
        }

        fn find(
            &self,
            id: EventId,
        ) -> impl Future<Output = Result<Option<Event>, ParalympicsError>> + Send {
            let store = self.store.lock().unwrap();
            let result = store.get(&id).cloned();
            async { Ok(result) }
        }

        fn get_all(&self) -> impl Future<Output = Result<Vec<Event>, ParalympicsError>> + Send {
            let store = self.store.lock().unwrap();
            let result: Vec<Event> = store.values().cloned().collect();
            async { Ok(result) }
        }

        fn update(
            &self,
            event: Event,
        ) -> impl Future<Output = Result<Event, ParalympicsError>> + Send {
            let mut store = self.store.lock().unwrap();
            let result = match store.get_mut(&event.id) {
                Some(slot) => {
                    *slot = event.clone();
                    Ok(event)
                }
                None => Err(not_found(event.id)),
            };
            async { result }
        }

        fn delete(&self, id: EventId) -> impl Future<Output = Result<(), ParalympicsError>> + Send {
            let mut store = self.store.lock().unwrap();
            let result = store.remove(&id).map(|_| ()).ok_or_else(|| not_found(id));
            async { result }
        }
    }

    /// Fixed set of regions; writes are never exercised by the event service.
    struct FixedRegions(Vec<Region>);

    impl RegionRepository for FixedRegions {
        async fn create(&self, region: Region) -> Result<Region, ParalympicsError> {
            Ok(region)
        }
        async fn find(&self, noc: Noc) -> Result<Option<Region>, ParalympicsError> {
            Ok(self.0.iter().find(|r| r.noc == noc).cloned())
        }
        async fn get_all(&self) -> Result<Vec<Region>, ParalympicsError> {
            Ok(self.0.clone())
        }
        async fn update(&self, region: Region) -> Result<Region, ParalympicsError> {
            Ok(region)
        }
        async fn delete(&self, _noc: Noc) -> Result<(), ParalympicsError> {
            Ok(())
        }
    }

    fn region(noc: &str, name: &str) -> Region {
        Region {
            noc: Noc::from(noc),
            region: name.to_string(),
            notes: None,
        }
    }

    fn make_service() -> EventService<InMemoryEventRepo, FixedRegions> {
        EventService::new(
            InMemoryEventRepo::default(),
            FixedRegions(vec![
                region("GBR", "Great Britain"),
                region("CAN", "Canada"),
            ]),
        )
    }

    fn london() -> Value {
        json!({
            "type": "summer",
            "year": 2012,
            "country": "UK",
            "host": "London",
            "NOC": "GBR",
            "participants": 4237
        })
    }

    #[tokio::test]
    async fn should_create_event_with_generated_id() {
        let svc = make_service();
        let first = svc.create_event(&london()).await.unwrap();
        let second = svc.create_event(&london()).await.unwrap();

        assert_eq!(first.id, EventId::new(1));
        assert_eq!(second.id, EventId::new(2));
        assert_eq!(svc.get_event(first.id).await.unwrap().details.host, "London");
    }

    #[tokio::test]
    async fn should_open_span_when_listing_events() {
        let spans = SpanNames::default();
        let _guard = tracing::subscriber::set_default(spans.clone());

        make_service().list_events().await.unwrap();

        assert!(spans.names().contains(&"list_events"));
    }

    #[tokio::test]
    async fn should_reject_event_for_unknown_region() {
        let svc = make_service();
        let mut body = london();
        body["NOC"] = json!("XXX");

        let result = svc.create_event(&body).await;
        let Err(ParalympicsError::Validation(err)) = result else {
            panic!("expected validation error");
        };
        assert_eq!(
            err.messages("NOC"),
            Some(&["No region with NOC= XXX.".to_string()][..])
        );
        assert!(svc.list_events().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn should_reject_event_missing_required_field() {
        let svc = make_service();
        let mut body = london();
        body.as_object_mut().unwrap().remove("year");

        let result = svc.create_event(&body).await;
        let Err(ParalympicsError::Validation(err)) = result else {
            panic!("expected validation error");
        };
        assert_eq!(err.messages("year"), Some(&[MISSING.to_string()][..]));
    }

    #[tokio::test]
    async fn should_patch_only_supplied_fields() {
        let svc = make_service();
        let created = svc.create_event(&london()).await.unwrap();

        let patched = svc
            .patch_event(created.id, &json!({"highlights": "Superhumans"}))
            .await
            .unwrap();

        assert_eq!(patched.details.highlights.as_deref(), Some("Superhumans"));
        assert_eq!(patched.details.participants, Some(4237));
        assert_eq!(patched.details.year, 2012);
    }

    #[tokio::test]
    async fn should_check_region_when_patch_moves_event() {
        let svc = make_service();
        let created = svc.create_event(&london()).await.unwrap();

        let moved = svc
            .patch_event(created.id, &json!({"NOC": "CAN"}))
            .await
            .unwrap();
        assert_eq!(moved.details.noc, Noc::from("CAN"));

        let result = svc.patch_event(created.id, &json!({"NOC": "XXX"})).await;
        assert!(matches!(result, Err(ParalympicsError::Validation(_))));
    }

    #[tokio::test]
    async fn should_reject_patch_carrying_id() {
        let svc = make_service();
        let created = svc.create_event(&london()).await.unwrap();

        let result = svc.patch_event(created.id, &json!({"id": 99})).await;
        let Err(ParalympicsError::Validation(err)) = result else {
            panic!("expected validation error");
        };
        assert_eq!(err.messages("id"), Some(&[UNKNOWN_FIELD.to_string()][..]));
    }

    #[tokio::test]
    async fn should_return_not_found_when_patching_missing_event() {
        let svc = make_service();
        let result = svc.patch_event(EventId::new(42), &json!({"year": 2000})).await;
        assert!(matches!(result, Err(ParalympicsError::NotFound(_))));
    }

    #[tokio::test]
    async fn should_delete_event() {
        let svc = make_service();
        let created = svc.create_event(&london()).await.unwrap();

        svc.delete_event(created.id).await.unwrap();

        assert!(matches!(
            svc.get_event(created.id).await,
            Err(ParalympicsError::NotFound(_))
        ));
        assert!(matches!(
            svc.delete_event(created.id).await,
            Err(ParalympicsError::NotFound(_))
        ));
    }
}
