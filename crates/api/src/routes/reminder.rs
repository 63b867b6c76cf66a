use axum::{Router, routing::get};
use std::sync::Arc;

use crate::{ApiState, handlers::reminder};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/event/:id/set-reminder/",
            get(reminder::set_reminder_form).post(reminder::set_reminder),
        )
        .route(
            "/reminder/:id/delete/",
            get(reminder::delete_reminder_redirect).post(reminder::delete_reminder),
        )
}
