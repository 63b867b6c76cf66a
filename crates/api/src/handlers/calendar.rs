use axum::{
    Json,
    extract::{Query, State},
};
use eventcal_core::calendar::{CalendarRequest, CalendarView, build_view};
use serde::Deserialize;
use std::sync::Arc;

use crate::{
    ApiState,
    handlers::{Page, render},
    middleware::error_handling::AppError,
};

/// Raw query parameters of the calendar list. Kept as strings so malformed
/// numbers surface as `BadRequest` rather than an extractor rejection.
#[derive(Debug, Default, Deserialize)]
pub struct CalendarQuery {
    pub view: Option<String>,
    pub year: Option<String>,
    pub month: Option<String>,
}

/// `GET /?view=day|week|month&year=YYYY&month=M`
#[axum::debug_handler]
pub async fn event_list(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<CalendarQuery>,
) -> Result<Json<Page<CalendarView>>, AppError> {
    let today = state.clock.today();
    let request = CalendarRequest::from_params(
        query.view.as_deref(),
        query.year.as_deref(),
        query.month.as_deref(),
        today,
    )?;

    let window = request.window(today);
    let events = state.store.events_between(window.start, window.end).await?;
    tracing::debug!(
        "Calendar {:?} view {}..={}: {} events",
        request.mode,
        window.start,
        window.end,
        events.len()
    );

    Ok(render(&state, build_view(&request, today, events)).await)
}
