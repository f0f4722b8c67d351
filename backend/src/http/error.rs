//! HTTP error handling and response types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use crate::db::repository::RepositoryError;

/// Message returned for store failures that are not passed through.
pub const GENERIC_SERVER_ERROR: &str = "Server error";

/// API error response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    /// Human-readable error message
    pub error: String,
    /// Error code for programmatic handling
    pub code: String,
}

impl ApiError {
    pub fn new(code: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code: code.into(),
        }
    }
}

/// Application error type for HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    /// Resource not found
    NotFound(String),
    /// Invalid request (validation error)
    BadRequest(String),
    /// Internal server error; the message is sent to the client verbatim
    Internal(String),
    /// Repository error; store failures are logged and hidden behind a generic message
    Repository(RepositoryError),
}

impl AppError {
    /// Map a repository error so that store failures keep their raw message.
    ///
    /// Used by the log endpoint, which reports the underlying failure to the
    /// client instead of the generic message.
    pub fn passthrough(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { .. } | RepositoryError::ValidationError { .. } => {
                AppError::Repository(err)
            }
            other => {
                error!(error = %other, "store failure");
                AppError::Internal(other.to_string())
            }
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Repository(RepositoryError::NotFound { .. }) => StatusCode::NOT_FOUND,
            AppError::Repository(RepositoryError::ValidationError { .. }) => {
                StatusCode::BAD_REQUEST
            }
            AppError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error = match self {
            AppError::NotFound(msg) => ApiError::new("NOT_FOUND", msg),
            AppError::BadRequest(msg) => {
                warn!(message = %msg, "rejected request");
                ApiError::new("BAD_REQUEST", msg)
            }
            AppError::Internal(msg) => ApiError::new("INTERNAL_ERROR", msg),
            AppError::Repository(e) => match e {
                RepositoryError::NotFound { message, .. } => ApiError::new("NOT_FOUND", message),
                RepositoryError::ValidationError { message, .. } => {
                    ApiError::new("BAD_REQUEST", message)
                }
                other => {
                    error!(error = %other, "store failure");
                    ApiError::new("REPOSITORY_ERROR", GENERIC_SERVER_ERROR)
                }
            },
        };

        (status, Json(error)).into_response()
    }
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        AppError::Repository(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn render(err: AppError) -> (StatusCode, ApiError) {
        let response = err.into_response();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_store_failure_is_generic() {
        let (status, body) =
            render(AppError::from(RepositoryError::connection("pool exhausted"))).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error, GENERIC_SERVER_ERROR);
        assert_eq!(body.code, "REPOSITORY_ERROR");
    }

    #[tokio::test]
    async fn test_passthrough_keeps_raw_message() {
        let (status, body) =
            render(AppError::passthrough(RepositoryError::query("relation missing"))).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error, "Query error: relation missing");
        assert_eq!(body.code, "INTERNAL_ERROR");
    }

    #[tokio::test]
    async fn test_repository_not_found_maps_to_404() {
        let (status, body) =
            render(AppError::passthrough(RepositoryError::not_found("User not found"))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, ApiError::new("NOT_FOUND", "User not found"));
    }

    #[tokio::test]
    async fn test_repository_validation_maps_to_400() {
        let (status, body) =
            render(AppError::from(RepositoryError::validation("Username is required"))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.error, "Username is required");
    }
}
