use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use database::is_unique_violation;
use sea_orm::DbErr;
use thiserror::Error;
use uuid::Uuid;
use validator::ValidationErrors;

#[derive(Debug, Error)]
pub enum ProductError {
    #[error("Product not found: {0}")]
    NotFound(Uuid),

    /// Duplicate id, stale version or an invalid state transition
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type ProductResult<T> = Result<T, ProductError>;

impl From<ValidationErrors> for ProductError {
    fn from(err: ValidationErrors) -> Self {
        ProductError::Validation(err.to_string())
    }
}

/// Unique violations become conflicts; anything else the store reports is internal.
impl From<DbErr> for ProductError {
    fn from(err: DbErr) -> Self {
        if is_unique_violation(&err) {
            ProductError::Conflict(format!("Duplicate key: {err}"))
        } else {
            ProductError::Internal(format!("Database error: {err}"))
        }
    }
}

/// Convert ProductError to AppError for standardized error responses
impl From<ProductError> for AppError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::NotFound(id) => AppError::NotFound(format!("Product {id} not found")),
            ProductError::Conflict(msg) => AppError::Conflict(msg),
            ProductError::Validation(msg) => AppError::BadRequest(msg),
            ProductError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for ProductError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
