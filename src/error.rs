use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use thiserror::Error;

use crate::dao::storage::StorageError;

/// Message returned when a rig request names something other than dark or light.
pub const INVALID_OUTCOME: &str = "Invalid outcome";
/// Message returned when a reported result is not a wheel label.
pub const INVALID_RESULT: &str = "Invalid result";
/// Message returned when the spin log cannot be written.
pub const LOGGING_FAILURE: &str = "Logging system error";

/// Errors that can occur in service layer operations.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Spin log backend failed.
    #[error("storage unavailable")]
    Unavailable(#[source] StorageError),
    /// Invalid input provided by the client.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl From<StorageError> for ServiceError {
    fn from(err: StorageError) -> Self {
        ServiceError::Unavailable(err)
    }
}

/// Application-level errors that are converted to HTTP responses.
#[derive(Debug, Error)]
pub enum AppError {
    /// Bad request with invalid input.
    #[error("{0}")]
    BadRequest(String),
    /// Internal server error.
    #[error("{0}")]
    Internal(String),
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Unavailable(_) => AppError::Internal(LOGGING_FAILURE.into()),
            ServiceError::InvalidInput(message) => AppError::BadRequest(message),
        }
    }
}

/// Body of a rejected request: `{"success": false, "message": ...}`.
#[derive(Serialize)]
struct RejectionBody {
    success: bool,
    message: String,
}

/// Body of a server-side failure: `{"error": ...}`.
#[derive(Serialize)]
struct FailureBody {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        match self {
            AppError::BadRequest(message) => (
                StatusCode::BAD_REQUEST,
                Json(RejectionBody {
                    success: false,
                    message,
                }),
            )
                .into_response(),
            AppError::Internal(error) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(FailureBody { error }),
            )
                .into_response(),
        }
    }
}
