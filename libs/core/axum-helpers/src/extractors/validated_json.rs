//! JSON body extractor that runs `validator` rules before the handler.

use crate::errors::AppError;
use axum::{
    extract::{FromRequest, Json, Request},
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;
use validator::Validate;

/// Deserializes the body and validates it.
///
/// A body that does not decode is rejected with the JSON extraction envelope
/// (400, or 415 without a JSON content type); a body that decodes but fails its
/// `Validate` rules is a 400 with per-field details.
///
/// ```ignore
/// #[derive(Deserialize, Validate)]
/// struct PayloadMaterial {
///     #[validate(length(min = 1, max = 255))]
///     title: String,
/// }
///
/// async fn create(ValidatedJson(payload): ValidatedJson<PayloadMaterial>) { /* ... */ }
/// ```
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| AppError::from(e).into_response())?;

        data.validate()
            .map_err(|e| AppError::from(e).into_response())?;

        Ok(ValidatedJson(data))
    }
}
