//! HTTP error response mapping.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use paralympics_domain::error::{ParalympicsError, ValidationError};

/// JSON error body returned for everything but validation failures.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Maps [`ParalympicsError`] to an HTTP response with appropriate status code.
///
/// Validation failures keep their per-field map as the body; other kinds are
/// wrapped in `{"error": ...}`.
#[derive(Debug)]
pub struct ApiError(ParalympicsError);

impl From<ParalympicsError> for ApiError {
    fn from(err: ParalympicsError) -> Self {
        Self(err)
    }
}

/// A body that is not JSON at all is reported against the whole payload.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        let err = ValidationError::single(ValidationError::SCHEMA, rejection.body_text());
        Self(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self.0 {
            ParalympicsError::Validation(err) => {
                return (StatusCode::BAD_REQUEST, Json(err)).into_response();
            }
            ParalympicsError::NotFound(err) => (StatusCode::NOT_FOUND, err.to_string()),
            ParalympicsError::Conflict(err) => (StatusCode::CONFLICT, err.to_string()),
            ParalympicsError::Storage(err) => {
                tracing::error!(error = %err, "storage error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use paralympics_domain::error::{ConflictError, NotFoundError};
    use serde_json::{Value, json};

    async fn render(err: ParalympicsError) -> (StatusCode, Value) {
        let response = ApiError::from(err).into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn should_render_validation_error_as_field_map() {
        let (status, body) =
            render(ValidationError::single("region", "Missing data for required field.").into())
                .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"region": ["Missing data for required field."]}));
    }

    #[tokio::test]
    async fn should_render_not_found_as_404() {
        let (status, body) = render(
            NotFoundError {
                entity: "Region",
                id: "XXX".to_string(),
            }
            .into(),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"error": "Region XXX not found"}));
    }

    #[tokio::test]
    async fn should_render_conflict_as_409() {
        let (status, _) = render(ConflictError::Constraint.into()).await;
        assert_eq!(status, StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn should_hide_storage_details() {
        let (status, body) = render(ParalympicsError::Storage("disk on fire".into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"error": "internal server error"}));
    }
}
