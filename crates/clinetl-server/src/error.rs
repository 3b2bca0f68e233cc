//! Server-specific error types

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::ingest::EngineError;

/// Result type alias for handler operations
pub type AppResult<T> = std::result::Result<T, AppError>;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl From<EngineError> for AppError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::JobNotFound(_) => AppError::NotFound(err.to_string()),
            EngineError::JobAlreadyRunning(_) => AppError::Conflict(err.to_string()),
            EngineError::Validation(message) => AppError::Validation(message),
        }
    }
}

impl From<clinetl_common::EtlError> for AppError {
    fn from(err: clinetl_common::EtlError) -> Self {
        match err {
            clinetl_common::EtlError::InvalidJobState(_) => AppError::BadRequest(err.to_string()),
            other => AppError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::NotFound(ref message) => (StatusCode::NOT_FOUND, message.clone()),
            AppError::Conflict(ref message) => (StatusCode::CONFLICT, message.clone()),
            AppError::Validation(ref message) => (StatusCode::BAD_REQUEST, message.clone()),
            AppError::BadRequest(ref message) => (StatusCode::BAD_REQUEST, message.clone()),
            AppError::Internal(ref message) => {
                tracing::error!("Internal error: {}", message);
                (StatusCode::INTERNAL_SERVER_ERROR, message.clone())
            },
        };

        let body = Json(json!({
            "error": {
                "message": error_message,
                "status": status.as_u16(),
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_errors_map_to_status_codes() {
        let cases = [
            (EngineError::JobNotFound("j".into()), StatusCode::NOT_FOUND),
            (EngineError::JobAlreadyRunning("j".into()), StatusCode::CONFLICT),
            (EngineError::Validation("jobId is required".into()), StatusCode::BAD_REQUEST),
        ];

        for (err, expected) in cases {
            let response = AppError::from(err).into_response();
            assert_eq!(response.status(), expected);
        }
    }

    #[test]
    fn test_not_found_message_names_job() {
        let err = AppError::from(EngineError::JobNotFound("job-42".into()));
        assert_eq!(err.to_string(), "Not found: Job not found: job-42");
    }
}
