//! Request extractors whose rejections use the JSON error body
//!
//! axum's stock `Path` and `Form` reject with plain-text responses. These
//! wrappers turn the rejection into an [`ApiError`].

use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
    Form,
};
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// Integer record id from the `:id` route segment
///
/// A segment that does not parse as an integer cannot name a record, so it
/// is reported as 404.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordId(pub i64);

#[async_trait]
impl<S> FromRequestParts<S> for RecordId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<i64>::from_request_parts(parts, state).await {
            Ok(Path(id)) => Ok(RecordId(id)),
            Err(rejection) => Err(ApiError::NotFound(format!(
                "No record for {}: {}",
                parts.uri.path(),
                rejection.body_text()
            ))),
        }
    }
}

/// URL-encoded form body; a wrong content type or undecodable body is 400
#[derive(Debug, Clone)]
pub struct FormBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for FormBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Form(value) = Form::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
        Ok(FormBody(value))
    }
}
