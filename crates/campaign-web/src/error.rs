//! Error types for the HTTP API.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use campaign_core::{GenerationError, LogStoreError};
use thiserror::Error;

/// Errors that can occur while handling an API request.
#[derive(Debug, Error)]
pub enum WebError {
    /// No authenticated user on the request.
    #[error("Unauthorized")]
    Unauthorized,

    /// The request body or query is missing fields or malformed.
    #[error("{0}")]
    BadRequest(String),

    /// Copy generation failed.
    #[error("{0}")]
    Generation(#[from] GenerationError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] database::DatabaseError),

    /// The message log could not be written.
    #[error("{0}")]
    LogStore(#[from] LogStoreError),
}

impl WebError {
    fn status(&self) -> StatusCode {
        match self {
            WebError::Unauthorized => StatusCode::UNAUTHORIZED,
            WebError::BadRequest(_) => StatusCode::BAD_REQUEST,
            WebError::Generation(GenerationError::InvalidRequest(_)) => StatusCode::BAD_REQUEST,
            WebError::Generation(_) | WebError::Database(_) | WebError::LogStore(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }

        let body = serde_json::json!({
            "success": false,
            "error": self.to_string(),
        });

        (status, Json(body)).into_response()
    }
}

/// Result type for API handlers.
pub type Result<T> = std::result::Result<T, WebError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(WebError::Unauthorized.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            WebError::BadRequest("Invalid tone".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            WebError::from(GenerationError::InvalidRequest("empty".into())).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            WebError::from(GenerationError::Configuration("GEMINI_API_KEY".into())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_generation_error_message_passes_through() {
        let err = WebError::from(GenerationError::Exhausted {
            attempts: 2,
            last: Box::new(GenerationError::Rejected {
                model: "gemini-1.5-pro".into(),
                status: 429,
                message: "quota exceeded".into(),
            }),
        });
        assert!(err.to_string().contains("quota exceeded"));
    }
}
