use std::convert::Infallible;

use async_trait::async_trait;
use axum::{extract::FromRequestParts, http::request::Parts};

pub const REQUESTED_WITH_HEADER: &str = "x-requested-with";
pub const XML_HTTP_REQUEST: &str = "XMLHttpRequest";

/// Whether the caller is a script expecting data rather than a page,
/// signalled by `X-Requested-With: XMLHttpRequest`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AsyncRequest(pub bool);

#[async_trait]
impl<S> FromRequestParts<S> for AsyncRequest
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let is_async = parts
            .headers
            .get(REQUESTED_WITH_HEADER)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value == XML_HTTP_REQUEST);
        Ok(AsyncRequest(is_async))
    }
}
