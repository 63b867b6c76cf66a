//! # Error Handling Middleware
//!
//! Maps domain errors to HTTP status codes and JSON error bodies so every
//! handler reports failures the same way.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use eventcal_core::errors::CalError;
use serde_json::json;

/// Application error wrapper that provides HTTP status code mapping
///
/// `AppError` wraps `CalError` and implements `IntoResponse`. Validation
/// failures carry their field-level messages under `fields`.
///
/// # Example
///
/// ```
/// use axum::Json;
/// use eventcal_api::middleware::error_handling::AppError;
/// use eventcal_core::errors::CalError;
///
/// async fn handler(id: i64, found: Option<String>) -> Result<Json<String>, AppError> {
///     let title = found.ok_or_else(|| CalError::event_not_found(id))?;
///     Ok(Json(title))
/// }
/// # fn main() {}
/// ```
#[derive(Debug)]
pub struct AppError(pub CalError);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            CalError::NotFound(_) => StatusCode::NOT_FOUND,
            CalError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            CalError::Conflict(_) => StatusCode::CONFLICT,
            CalError::BadRequest(_) => StatusCode::BAD_REQUEST,
            CalError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            CalError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!("Request failed: {:?}", self.0);
        }

        let body = match &self.0 {
            CalError::Validation(errors) => json!({
                "error": "Validation error",
                "fields": errors,
            }),
            other => json!({ "error": other.to_string() }),
        };

        (status, Json(body)).into_response()
    }
}

/// Allows `?` on functions returning `CalResult<T>` inside handlers.
impl From<CalError> for AppError {
    fn from(err: CalError) -> Self {
        AppError(err)
    }
}

/// Wraps an eyre report as a database failure.
impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        AppError(CalError::Database(err))
    }
}

/// Maps a CalError to an HTTP response
pub fn map_error(err: CalError) -> Response {
    AppError(err).into_response()
}
