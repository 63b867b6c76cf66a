use axum::{
    Form, Json,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use eventcal_core::{
    errors::CalError,
    models::event::{
        AttendanceResponse, DeleteEventView, Event, EventDetailView, EventForm, EventFormView,
    },
};
use std::sync::Arc;
use tracing::info;

use crate::{
    ApiState,
    handlers::{Page, render},
    middleware::{error_handling::AppError, path::RecordId, xhr::AsyncRequest},
};

pub const EVENT_LIST_PATH: &str = "/";

pub fn event_detail_path(id: i64) -> String {
    format!("/event/{}/", id)
}

async fn find_event(state: &ApiState, id: i64) -> Result<Event, AppError> {
    let event = state
        .store
        .get_event(id)
        .await?
        .ok_or_else(|| CalError::event_not_found(id))?;
    Ok(event)
}

/// `GET /add/` renders a blank form with today's date filled in.
#[axum::debug_handler]
pub async fn add_event_form(State(state): State<Arc<ApiState>>) -> Json<Page<EventFormView>> {
    let form = EventForm {
        date: Some(state.clock.today().format("%Y-%m-%d").to_string()),
        ..EventForm::default()
    };
    render(&state, EventFormView { form, event: None }).await
}

/// `POST /add/`
#[axum::debug_handler]
pub async fn add_event(
    State(state): State<Arc<ApiState>>,
    Form(form): Form<EventForm>,
) -> Result<Redirect, AppError> {
    let input = form.validate().map_err(CalError::from)?;
    let event = state.store.create_event(&input, state.clock.now()).await?;

    info!("Created event id={} on {}", event.id, event.date);
    state
        .flash
        .success(format!(
            "Event \"{}\" has been created successfully!",
            event.title
        ))
        .await;
    Ok(Redirect::to(EVENT_LIST_PATH))
}

/// `GET /event/{id}/`
#[axum::debug_handler]
pub async fn event_detail(
    State(state): State<Arc<ApiState>>,
    RecordId(id): RecordId,
) -> Result<Json<Page<EventDetailView>>, AppError> {
    let event = find_event(&state, id).await?;
    let reminders = state.store.reminders_for_event(id).await?;

    let view = EventDetailView {
        event: event.view(state.clock.today()),
        reminders: reminders.iter().map(|r| r.view(&event)).collect(),
    };
    Ok(render(&state, view).await)
}

/// `GET /event/{id}/edit/` renders the form prefilled from the stored event.
#[axum::debug_handler]
pub async fn edit_event_form(
    State(state): State<Arc<ApiState>>,
    RecordId(id): RecordId,
) -> Result<Json<Page<EventFormView>>, AppError> {
    let event = find_event(&state, id).await?;
    let view = EventFormView {
        form: event.to_form(),
        event: Some(event.view(state.clock.today())),
    };
    Ok(render(&state, view).await)
}

/// `POST /event/{id}/edit/`
#[axum::debug_handler]
pub async fn edit_event(
    State(state): State<Arc<ApiState>>,
    RecordId(id): RecordId,
    Form(form): Form<EventForm>,
) -> Result<Redirect, AppError> {
    find_event(&state, id).await?;
    let input = form.validate().map_err(CalError::from)?;
    let event = state
        .store
        .update_event(id, &input, state.clock.now())
        .await?
        .ok_or_else(|| CalError::event_not_found(id))?;

    info!("Updated event id={}", event.id);
    state
        .flash
        .success(format!(
            "Event \"{}\" has been updated successfully!",
            event.title
        ))
        .await;
    Ok(Redirect::to(EVENT_LIST_PATH))
}

/// `GET /event/{id}/delete/` renders the confirmation page.
#[axum::debug_handler]
pub async fn delete_event_confirm(
    State(state): State<Arc<ApiState>>,
    RecordId(id): RecordId,
) -> Result<Json<Page<DeleteEventView>>, AppError> {
    let event = find_event(&state, id).await?;
    let view = DeleteEventView {
        event: event.view(state.clock.today()),
    };
    Ok(render(&state, view).await)
}

/// `POST /event/{id}/delete/` removes the event and its reminders.
#[axum::debug_handler]
pub async fn delete_event(
    State(state): State<Arc<ApiState>>,
    RecordId(id): RecordId,
) -> Result<Redirect, AppError> {
    let event = state
        .store
        .delete_event(id)
        .await?
        .ok_or_else(|| CalError::event_not_found(id))?;

    info!("Deleted event id={}", event.id);
    state
        .flash
        .success(format!(
            "Event \"{}\" has been deleted successfully!",
            event.title
        ))
        .await;
    Ok(Redirect::to(EVENT_LIST_PATH))
}

/// `POST /event/{id}/mark-attended/`
///
/// Queues a status message either way. Script callers get the new flag as
/// JSON; everyone else is redirected to the calendar.
#[axum::debug_handler]
pub async fn mark_attended(
    State(state): State<Arc<ApiState>>,
    RecordId(id): RecordId,
    AsyncRequest(is_async): AsyncRequest,
) -> Result<Response, AppError> {
    let event = state
        .store
        .toggle_attended(id, state.clock.now())
        .await?
        .ok_or_else(|| CalError::event_not_found(id))?;

    info!(
        "Event id={} marked {}",
        event.id,
        event.attendance_status()
    );

    state
        .flash
        .success(format!(
            "Event \"{}\" marked as {}!",
            event.title,
            event.attendance_status()
        ))
        .await;

    if is_async {
        return Ok(Json(AttendanceResponse::for_event(&event)).into_response());
    }
    Ok(Redirect::to(EVENT_LIST_PATH).into_response())
}

/// `GET /event/{id}/mark-attended/` changes nothing and returns to the calendar.
#[axum::debug_handler]
pub async fn mark_attended_redirect(
    State(state): State<Arc<ApiState>>,
    RecordId(id): RecordId,
) -> Result<Redirect, AppError> {
    find_event(&state, id).await?;
    Ok(Redirect::to(EVENT_LIST_PATH))
}
