//! Error types for the REST API.

use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use tracing::{error, warn};


/// API error response body.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub detail: String,
    /// Error code.
    pub code: String,
}

/// API error types.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Request rejected before reaching an upstream.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Upstream call failed or answered without the expected data.
    #[error("{0}")]
    Upstream(String),

    /// Upstream call timed out.
    #[error("{0}")]
    Timeout(String),

    /// Internal server error.
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ApiError {
    /// HTTP status and error code for this error.
    #[must_use]
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::InvalidRequest(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            ApiError::Upstream(_) => (StatusCode::BAD_REQUEST, "UPSTREAM_ERROR"),
            ApiError::Timeout(_) => (StatusCode::REQUEST_TIMEOUT, "UPSTREAM_TIMEOUT"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        match &self {
            ApiError::Internal(msg) => error!("{}", msg),
            ApiError::Upstream(msg) | ApiError::Timeout(msg) => warn!(code, "{}", msg),
            ApiError::InvalidRequest(_) => {}
        }

        let body = Json(ErrorResponse {
            detail: self.to_string(),
            code: code.to_string(),
        });

        (status, body).into_response()
    }
}

impl From<upstream_client::Error> for ApiError {
    fn from(err: upstream_client::Error) -> Self {
        if err.is_validation() {
            ApiError::InvalidRequest(err.to_string())
        } else if err.is_timeout() {
            ApiError::Timeout(err.to_string())
        } else if err.is_upstream() {
            ApiError::Upstream(err.to_string())
        } else {
            ApiError::Internal(err.to_string())
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::InvalidRequest(rejection.body_text())
    }
}
