//! Request handlers. Pages are returned as JSON view models wrapped in
//! [`Page`], which also carries pending flash messages.

pub mod calendar;
pub mod event;
pub mod reminder;

use axum::Json;
use eventcal_core::models::message::FlashMessage;
use serde::Serialize;

use crate::ApiState;

/// A rendered view plus the flash messages queued before it.
#[derive(Debug, Serialize)]
pub struct Page<T> {
    #[serde(flatten)]
    pub view: T,
    pub messages: Vec<FlashMessage>,
}

/// Wraps `view` in a page, consuming the pending flash messages.
pub async fn render<T: Serialize>(state: &ApiState, view: T) -> Json<Page<T>> {
    Json(Page {
        view,
        messages: state.flash.take().await,
    })
}
