//! JSON REST handlers for regions.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::Value;

use paralympics_app::ports::{EventRepository, RegionRepository};
use paralympics_app::services::region_service::Upsert;
use paralympics_domain::id::Noc;
use paralympics_domain::region::Region;

use super::Message;
use crate::error::ApiError;
use crate::state::AppState;

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Vec<Region>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the get endpoint.
pub enum GetResponse {
    Ok(Json<Region>),
}

impl IntoResponse for GetResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the create, replace and patch endpoints.
pub enum WriteResponse {
    Created(Noc),
    Updated(Noc),
}

impl IntoResponse for WriteResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(noc) => (
                StatusCode::CREATED,
                Json(Message::new(format!("Region added with NOC= {noc}"))),
            )
                .into_response(),
            Self::Updated(noc) => {
                Json(Message::new(format!("Region {noc} updated"))).into_response()
            }
        }
    }
}

/// Possible responses from the delete endpoint.
pub enum DeleteResponse {
    Deleted(Noc),
}

impl IntoResponse for DeleteResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Deleted(noc) => {
                Json(Message::new(format!("Region {noc} deleted"))).into_response()
            }
        }
    }
}

/// `GET /regions`
pub async fn list<RR, ER>(
    State(state): State<AppState<RR, ER>>,
) -> Result<ListResponse, ApiError>
where
    RR: RegionRepository + Send + Sync + 'static,
    ER: EventRepository + Send + Sync + 'static,
{
    let regions = state.region_service.list_regions().await?;
    Ok(ListResponse::Ok(Json(regions)))
}

/// `GET /regions/{code}`
pub async fn get<RR, ER>(
    State(state): State<AppState<RR, ER>>,
    Path(code): Path<String>,
) -> Result<GetResponse, ApiError>
where
    RR: RegionRepository + Send + Sync + 'static,
    ER: EventRepository + Send + Sync + 'static,
{
    let region = state.region_service.get_region(Noc::new(code)).await?;
    Ok(GetResponse::Ok(Json(region)))
}

/// `POST /regions`
pub async fn create<RR, ER>(
    State(state): State<AppState<RR, ER>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<WriteResponse, ApiError>
where
    RR: RegionRepository + Send + Sync + 'static,
    ER: EventRepository + Send + Sync + 'static,
{
    let Json(body) = payload?;
    let created = state.region_service.create_region(&body).await?;
    Ok(WriteResponse::Created(created.noc))
}

/// `PUT /regions/{code}`
pub async fn replace<RR, ER>(
    State(state): State<AppState<RR, ER>>,
    Path(code): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<WriteResponse, ApiError>
where
    RR: RegionRepository + Send + Sync + 'static,
    ER: EventRepository + Send + Sync + 'static,
{
    let Json(body) = payload?;
    let outcome = state
        .region_service
        .replace_region(Noc::new(code), &body)
        .await?;
    Ok(match outcome {
        Upsert::Created(region) => WriteResponse::Created(region.noc),
        Upsert::Replaced(region) => WriteResponse::Updated(region.noc),
    })
}

/// `PATCH /regions/{code}`
pub async fn patch<RR, ER>(
    State(state): State<AppState<RR, ER>>,
    Path(code): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<WriteResponse, ApiError>
where
    RR: RegionRepository + Send + Sync + 'static,
    ER: EventRepository + Send + Sync + 'static,
{
    let Json(body) = payload?;
    let updated = state
        .region_service
        .patch_region(Noc::new(code), &body)
        .await?;
    Ok(WriteResponse::Updated(updated.noc))
}

/// `DELETE /regions/{code}`
pub async fn delete<RR, ER>(
    State(state): State<AppState<RR, ER>>,
    Path(code): Path<String>,
) -> Result<DeleteResponse, ApiError>
where
    RR: RegionRepository + Send + Sync + 'static,
    ER: EventRepository + Send + Sync + 'static,
{
    let noc = Noc::new(code);
    state.region_service.delete_region(noc.clone()).await?;
    Ok(DeleteResponse::Deleted(noc))
}
