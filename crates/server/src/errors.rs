use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use service::errors::StoreError;
use thiserror::Error;
use tracing::error;

/// Route-boundary error. Every failure a handler or middleware can produce
/// renders as `{"error": <message>}` JSON with the matching status code.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(_) => {
                ApiError::NotFound("User configuration not found".to_string())
            }
            StoreError::AlreadyExists(_) => {
                ApiError::Conflict("User configuration already exists".to_string())
            }
            StoreError::InvalidId(_) => ApiError::BadRequest("Invalid user id".to_string()),
            // Corrupt documents and filesystem faults stay server-side; the
            // response body carries no detail beyond the status.
            StoreError::Corrupt(..) | StoreError::Serialize(_) | StoreError::Io(_) => {
                error!(error = %err, "config store failure");
                ApiError::Internal("Internal server error".to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let msg = self.to_string();
        (status, Json(serde_json::json!({"error": msg}))).into_response()
    }
}
