use axum::{Router, routing::get};
use std::sync::Arc;

use crate::{ApiState, handlers::event};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/add/", get(event::add_event_form).post(event::add_event))
        .route("/event/:id/", get(event::event_detail))
        .route(
            "/event/:id/edit/",
            get(event::edit_event_form).post(event::edit_event),
        )
        .route(
            "/event/:id/delete/",
            get(event::delete_event_confirm).post(event::delete_event),
        )
        .route(
            "/event/:id/mark-attended/",
            get(event::mark_attended_redirect).post(event::mark_attended),
        )
}
