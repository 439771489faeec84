//! Binding of write forms from the query string and the urlencoded body.

use axum::{
    Form,
    body::{self, Body},
    extract::{FromRequest, Query, Request},
};
use platform_api::ApiError;
use serde::de::DeserializeOwned;

use crate::forms::Overlay;

const BODY_LIMIT: usize = 2 * 1024 * 1024;

/// Form fields taken from the query string, overridden by any field the
/// urlencoded body supplies. An empty body is accepted whatever its
/// `Content-Type`.
#[derive(Debug)]
pub struct FormFields<T>(pub T);

impl<S, T> FromRequest<S> for FormFields<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Default + Overlay + Send,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let query = match req.uri().query() {
            Some(_) => Query::<T>::try_from_uri(req.uri())?.0,
            None => T::default(),
        };

        let (parts, raw) = req.into_parts();
        let bytes = body::to_bytes(raw, BODY_LIMIT)
            .await
            .map_err(|err| ApiError::invalid(format!("failed to read request body: {err}")))?;
        if bytes.is_empty() {
            return Ok(Self(query));
        }

        let Form(fields) =
            Form::<T>::from_request(Request::from_parts(parts, Body::from(bytes)), state).await?;
        Ok(Self(query.overlay(fields)))
    }
}
