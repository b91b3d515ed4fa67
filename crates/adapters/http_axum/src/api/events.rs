//! JSON REST handlers for events.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::Value;

use paralympics_app::ports::{EventRepository, RegionRepository};
use paralympics_domain::error::{NotFoundError, ParalympicsError};
use paralympics_domain::event::Event;
use paralympics_domain::id::EventId;

use super::Message;
use crate::error::ApiError;
use crate::state::AppState;

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Vec<Event>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the get and patch endpoints.
pub enum GetResponse {
    Ok(Json<Event>),
}

impl IntoResponse for GetResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the create endpoint.
pub enum CreateResponse {
    Created(EventId),
}

impl IntoResponse for CreateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(id) => {
                let body = Message {
                    message: format!("Event added with id= {id}"),
                    id: Some(id.get()),
                };
                (StatusCode::CREATED, Json(body)).into_response()
            }
        }
    }
}

/// Possible responses from the delete endpoint.
pub enum DeleteResponse {
    Deleted(EventId),
}

impl IntoResponse for DeleteResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Deleted(id) => Json(Message::new(format!("Event {id} deleted"))).into_response(),
        }
    }
}

/// An id that is not an integer cannot name a stored event.
fn parse_id(raw: &str) -> Result<EventId, ApiError> {
    raw.parse().map_err(|_| {
        ApiError::from(ParalympicsError::from(NotFoundError {
            entity: "Event",
            id: raw.to_string(),
        }))
    })
}

/// `GET /events`
pub async fn list<RR, ER>(
    State(state): State<AppState<RR, ER>>,
) -> Result<ListResponse, ApiError>
where
    RR: RegionRepository + Send + Sync + 'static,
    ER: EventRepository + Send + Sync + 'static,
{
    let events = state.event_service.list_events().await?;
    Ok(ListResponse::Ok(Json(events)))
}

/// `GET /events/{id}`
pub async fn get<RR, ER>(
    State(state): State<AppState<RR, ER>>,
    Path(id): Path<String>,
) -> Result<GetResponse, ApiError>
where
    RR: RegionRepository + Send + Sync + 'static,
    ER: EventRepository + Send + Sync + 'static,
{
    let event = state.event_service.get_event(parse_id(&id)?).await?;
    Ok(GetResponse::Ok(Json(event)))
}

/// `POST /events`
pub async fn create<RR, ER>(
    State(state): State<AppState<RR, ER>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<CreateResponse, ApiError>
where
    RR: RegionRepository + Send + Sync + 'static,
    ER: EventRepository + Send + Sync + 'static,
{
    let Json(body) = payload?;
    let created = state.event_service.create_event(&body).await?;
    Ok(CreateResponse::Created(created.id))
}

/// `PATCH /events/{id}`
pub async fn patch<RR, ER>(
    State(state): State<AppState<RR, ER>>,
    Path(id): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<GetResponse, ApiError>
where
    RR: RegionRepository + Send + Sync + 'static,
    ER: EventRepository + Send + Sync + 'static,
{
    let id = parse_id(&id)?;
    let Json(body) = payload?;
    let updated = state.event_service.patch_event(id, &body).await?;
    Ok(GetResponse::Ok(Json(updated)))
}

/// `DELETE /events/{id}`
pub async fn delete<RR, ER>(
    State(state): State<AppState<RR, ER>>,
    Path(id): Path<String>,
) -> Result<DeleteResponse, ApiError>
where
    RR: RegionRepository + Send + Sync + 'static,
    ER: EventRepository + Send + Sync + 'static,
{
    let id = parse_id(&id)?;
    state.event_service.delete_event(id).await?;
    Ok(DeleteResponse::Deleted(id))
}
