//! Request extractors whose rejections speak the API's error format.

use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
    Json,
};
use serde::de::DeserializeOwned;

use crate::error::{ApiError, CONTAINER_NOT_FOUND};

/// JSON request body. Any failure to read it as JSON (wrong or missing
/// `Content-Type`, empty or malformed body) is a 415.
#[derive(Debug)]
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => {
                tracing::debug!("json body rejected: {}", rejection.body_text());
                Err(ApiError::unsupported_media_type())
            }
        }
    }
}

/// `{id}` segment of an item route. Anything that is not a non-negative
/// integer is answered exactly like an unknown id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContainerId(pub u64);

#[async_trait]
impl<S> FromRequestParts<S> for ContainerId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<u64>::from_request_parts(parts, state).await {
            Ok(Path(id)) => Ok(Self(id)),
            Err(rejection) => {
                tracing::debug!("container id rejected: {}", rejection.body_text());
                Err(ApiError::not_found(CONTAINER_NOT_FOUND))
            }
        }
    }
}
