//! Custom Axum extractors

use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use axum::Json;
use serde::de::DeserializeOwned;

use super::error::ApiError;
use crate::models::ValidationError;

/// Extract and validate an integer entity id from path
pub struct ValidId(pub i32);

impl<S> FromRequestParts<S> for ValidId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::Validation(ValidationError::Empty { field: "id" }))?;

        let id = id.parse::<i32>().map_err(|_| {
            ApiError::Validation(ValidationError::InvalidFormat {
                field: "id",
                reason: "must be a 32-bit integer",
            })
        })?;

        Ok(Self(id))
    }
}

/// JSON body whose rejections use the API error shape instead of axum's
/// plain-text ones
pub struct ValidJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await.map_err(|rejection| {
            ApiError::Validation(ValidationError::Body {
                reason: rejection.body_text(),
            })
        })?;

        Ok(Self(value))
    }
}
