//! Mapping of request failures to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::{error, warn};

use super::types::ErrorResponse;
use super::validation::ValidationError;
use crate::readings::StoreError;

/// Every way a request can fail, rendered as `{"error": "..."}`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed or missing input (400).
    #[error(transparent)]
    BadRequest(#[from] ValidationError),
    /// No data for the requested resource (404).
    #[error("{0}")]
    NotFound(String),
    /// Unexpected fault; details are logged, not returned (500).
    #[error("Internal server error")]
    Internal(#[from] StoreError),
}

impl ApiError {
    /// Status code this error maps to.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            Self::BadRequest(reason) => warn!(%reason, "rejected request"),
            Self::NotFound(_) => {}
            Self::Internal(source) => error!(%source, "request failed"),
        }
        let body = ErrorResponse {
            error: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        let bad = ApiError::from(ValidationError::new("Smart meter ID cannot be empty"));
        assert_eq!(bad.status(), StatusCode::BAD_REQUEST);
        assert_eq!(bad.to_string(), "Smart meter ID cannot be empty");

        let missing = ApiError::NotFound("nothing here".into());
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);

        let internal = ApiError::from(StoreError::Poisoned);
        assert_eq!(internal.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(internal.to_string(), "Internal server error");
    }
}
