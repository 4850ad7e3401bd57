use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use database::is_unique_violation;
use sea_orm::DbErr;
use thiserror::Error;
use uuid::Uuid;
use validator::ValidationErrors;

#[derive(Debug, Error)]
pub enum MaterialError {
    #[error("Material not found: {0}")]
    NotFound(Uuid),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type MaterialResult<T> = Result<T, MaterialError>;

impl From<ValidationErrors> for MaterialError {
    fn from(err: ValidationErrors) -> Self {
        MaterialError::Validation(err.to_string())
    }
}

impl From<DbErr> for MaterialError {
    fn from(err: DbErr) -> Self {
        if is_unique_violation(&err) {
            MaterialError::Conflict(format!("Duplicate key: {err}"))
        } else {
            MaterialError::Internal(format!("Database error: {err}"))
        }
    }
}

impl From<MaterialError> for AppError {
    fn from(err: MaterialError) -> Self {
        match err {
            MaterialError::NotFound(id) => AppError::NotFound(format!("Material {id} not found")),
            MaterialError::Conflict(msg) => AppError::Conflict(msg),
            MaterialError::Validation(msg) => AppError::BadRequest(msg),
            MaterialError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for MaterialError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
