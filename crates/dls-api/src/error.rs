//! Core error → HTTP response mapping.
//!
//! Request-time violations become status codes with a `{"detail": …}` body;
//! store failures are logged in full and surfaced as an opaque 500.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use dls_core::error::CoreError;

/// Wrapper so handlers can return core errors (and anyhow store errors via
/// `?`) directly.
pub struct ApiError(CoreError);

pub type ApiResult<T> = Result<T, ApiError>;

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        ApiError(err)
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError(CoreError::Store(err))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match &self.0 {
            CoreError::NotFound(_) => (StatusCode::NOT_FOUND, "Download not found".to_string()),
            CoreError::InvalidState(message) => (StatusCode::BAD_REQUEST, message.clone()),
            CoreError::Store(err) => {
                tracing::error!("store failure: {err:#}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal error".to_string(),
                )
            }
        };
        (status, Json(json!({ "detail": detail }))).into_response()
    }
}
