pub mod codes;
pub mod handlers;
pub mod responses;

pub use codes::ErrorCode;

use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;
use validator::ValidationErrors;

/// Uniform error envelope returned by every endpoint.
///
/// ```json
/// {
///   "code": 1008,
///   "error": "CONFLICT",
///   "message": "Product 0b5c... is already deleted"
/// }
/// ```
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Integer error code for logging and monitoring
    pub code: i32,
    /// Machine-readable error identifier
    pub error: String,
    /// Human-readable error message
    pub message: String,
    /// Field level validation errors, when there are any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Error type every handler returns.
///
/// Domain errors convert into one of these variants; the HTTP status and
/// envelope are decided here and nowhere else.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("JSON extraction error: {0}")]
    JsonExtractorRejection(#[from] JsonRejection),

    #[error("Query extraction error: {0}")]
    QueryRejection(#[from] QueryRejection),

    #[error("Validation error: {0}")]
    ValidationError(#[from] ValidationErrors),

    #[error("Invalid UUID: {0}")]
    InvalidUuid(String),

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    /// The message is logged but never sent to the client
    #[error("Internal Server Error: {0}")]
    InternalServerError(String),

    #[error("Service Unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::JsonExtractorRejection(JsonRejection::MissingJsonContentType(e)) => {
                e.status()
            }
            AppError::JsonExtractorRejection(_) => StatusCode::BAD_REQUEST,
            AppError::QueryRejection(_)
            | AppError::ValidationError(_)
            | AppError::InvalidUuid(_)
            | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    pub fn error_code(&self) -> ErrorCode {
        match self {
            AppError::JsonExtractorRejection(_) => ErrorCode::JsonExtraction,
            AppError::QueryRejection(_) => ErrorCode::InvalidQuery,
            AppError::ValidationError(_) | AppError::BadRequest(_) => ErrorCode::ValidationError,
            AppError::InvalidUuid(_) => ErrorCode::InvalidUuid,
            AppError::NotFound(_) => ErrorCode::NotFound,
            AppError::Conflict(_) => ErrorCode::Conflict,
            AppError::InternalServerError(_) => ErrorCode::InternalError,
            AppError::ServiceUnavailable(_) => ErrorCode::ServiceUnavailable,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.error_code();

        let (message, details) = match self {
            AppError::JsonExtractorRejection(e) => {
                tracing::warn!(error_code = code.code(), error = %e, "Rejected request body");
                (e.body_text(), None)
            }
            AppError::QueryRejection(e) => {
                tracing::warn!(error_code = code.code(), error = %e, "Rejected query string");
                (e.body_text(), None)
            }
            AppError::ValidationError(e) => {
                tracing::info!(error_code = code.code(), errors = ?e, "Validation failed");
                (
                    code.default_message().to_string(),
                    serde_json::to_value(&e).ok(),
                )
            }
            AppError::InvalidUuid(raw) => {
                tracing::warn!(error_code = code.code(), value = %raw, "Invalid UUID");
                (format!("Invalid UUID: {raw}"), None)
            }
            AppError::BadRequest(msg) => {
                tracing::info!(error_code = code.code(), "Bad request: {}", msg);
                (msg, None)
            }
            AppError::NotFound(msg) => {
                tracing::info!(error_code = code.code(), "Not found: {}", msg);
                (msg, None)
            }
            AppError::Conflict(msg) => {
                tracing::info!(error_code = code.code(), "Conflict: {}", msg);
                (msg, None)
            }
            AppError::InternalServerError(msg) => {
                tracing::error!(error_code = code.code(), "Internal server error: {}", msg);
                (code.default_message().to_string(), None)
            }
            AppError::ServiceUnavailable(msg) => {
                tracing::warn!(error_code = code.code(), "Service unavailable: {}", msg);
                (msg, None)
            }
        };

        let body = Json(ErrorResponse {
            code: code.code(),
            error: code.as_str().to_string(),
            message,
            details,
        });

        (status, body).into_response()
    }
}

/// Builds an envelope response without going through [`AppError`].
pub fn error_response(status: StatusCode, message: String, error_code: ErrorCode) -> Response {
    let body = Json(ErrorResponse {
        code: error_code.code(),
        error: error_code.as_str().to_string(),
        message,
        details: None,
    });

    (status, body).into_response()
}
