use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use eventcal_core::errors::CalError;

use crate::middleware::error_handling::AppError;

/// The numeric `:id` segment of a record URL.
///
/// A segment that is not an integer names no record, so it is reported as
/// `404 Not Found` rather than a malformed request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordId(pub i64);

#[async_trait]
impl<S> FromRequestParts<S> for RecordId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<i64>::from_request_parts(parts, state).await {
            Ok(Path(id)) => Ok(RecordId(id)),
            Err(rejection) => {
                tracing::debug!("Rejected path {}: {}", parts.uri.path(), rejection);
                Err(AppError(CalError::NotFound(format!(
                    "No page at {}",
                    parts.uri.path()
                ))))
            }
        }
    }
}
