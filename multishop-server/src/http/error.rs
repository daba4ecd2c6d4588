//! API error types with IntoResponse
//!
//! Errors are converted to JSON responses with appropriate status codes.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::db::StorageError;
use crate::models::ValidationError;
use crate::order::OrderError;

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Validation failed (400)
    Validation(ValidationError),

    /// Resource not found (404)
    NotFound { resource: &'static str, id: i32 },

    /// Statement rejected by a constraint (409)
    Conflict { message: String },

    /// Store unreachable (503, logged)
    Unavailable(StorageError),

    /// Database error (500, logged)
    Database(StorageError),

    /// Internal error (500)
    Internal { message: String },
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            Self::Validation(e) => (
                StatusCode::BAD_REQUEST,
                json!({
                    "error": "validation_error",
                    "message": e.to_string()
                }),
            ),
            Self::NotFound { resource, id } => (
                StatusCode::NOT_FOUND,
                json!({
                    "error": "not_found",
                    "message": format!("{} '{}' not found", resource, id)
                }),
            ),
            Self::Conflict { message } => (
                StatusCode::CONFLICT,
                json!({
                    "error": "conflict",
                    "message": message
                }),
            ),
            Self::Unavailable(e) => {
                tracing::error!("Store unavailable: {}", e);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    json!({
                        "error": "unavailable",
                        "message": "the data store is unavailable"
                    }),
                )
            }
            Self::Database(e) => {
                // Log the actual error, return generic message
                tracing::error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "error": "internal_error",
                        "message": "an internal error occurred"
                    }),
                )
            }
            Self::Internal { message } => {
                tracing::error!("Internal error: {}", message);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "error": "internal_error",
                        "message": "an internal error occurred"
                    }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

impl From<StorageError> for ApiError {
    fn from(e: StorageError) -> Self {
        match e {
            StorageError::ConstraintViolation { message, .. } => Self::Conflict { message },
            StorageError::Connection(_) => Self::Unavailable(e),
            StorageError::Query(_) | StorageError::KeyspaceExhausted { .. } => Self::Database(e),
        }
    }
}

impl From<OrderError> for ApiError {
    fn from(e: OrderError) -> Self {
        match e {
            OrderError::Storage(inner) => inner.into(),
            OrderError::NotFound { resource, id } => Self::NotFound { resource, id },
            OrderError::HandlerNotRegistered(_) => Self::Internal {
                message: e.to_string(),
            },
        }
    }
}
