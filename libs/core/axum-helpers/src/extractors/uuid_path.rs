//! UUID path parameter extractor.

use crate::errors::AppError;
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
    response::{IntoResponse, Response},
};
use uuid::Uuid;

/// Parses the single `{id}` path segment as a UUID.
///
/// ```ignore
/// async fn get_product(UuidPath(id): UuidPath) -> String {
///     format!("product {id}")
/// }
///
/// let app = Router::new().route("/products/{id}", get(get_product));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct UuidPath(pub Uuid);

impl<S> FromRequestParts<S> for UuidPath
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(IntoResponse::into_response)?;

        Uuid::parse_str(&raw)
            .map(UuidPath)
            .map_err(|_| AppError::InvalidUuid(raw).into_response())
    }
}
