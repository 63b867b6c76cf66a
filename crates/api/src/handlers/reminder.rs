use axum::{
    Form, Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use eventcal_core::{
    errors::CalError,
    models::reminder::{Reminder, ReminderChoices, ReminderForm, ReminderFormView},
};
use std::sync::Arc;
use tracing::info;

use crate::{
    ApiState,
    handlers::{Page, event::event_detail_path, render},
    middleware::{error_handling::AppError, path::RecordId},
};

async fn find_reminder(state: &ApiState, id: i64) -> Result<Reminder, AppError> {
    let reminder = state
        .store
        .get_reminder(id)
        .await?
        .ok_or_else(|| CalError::reminder_not_found(id))?;
    Ok(reminder)
}

/// `GET /event/{id}/set-reminder/`
#[axum::debug_handler]
pub async fn set_reminder_form(
    State(state): State<Arc<ApiState>>,
    RecordId(event_id): RecordId,
) -> Result<Json<Page<ReminderFormView>>, AppError> {
    let event = state
        .store
        .get_event(event_id)
        .await?
        .ok_or_else(|| CalError::event_not_found(event_id))?;

    let view = ReminderFormView {
        event: event.view(state.clock.today()),
        form: ReminderForm::initial(),
        choices: ReminderChoices::default(),
    };
    Ok(render(&state, view).await)
}

/// `POST /event/{id}/set-reminder/`
///
/// A second reminder with the same lead time leaves the existing reminders as
/// they were. The form is served again with `409 Conflict` and an error
/// message.
#[axum::debug_handler]
pub async fn set_reminder(
    State(state): State<Arc<ApiState>>,
    RecordId(event_id): RecordId,
    Form(form): Form<ReminderForm>,
) -> Result<Response, AppError> {
    let event = state
        .store
        .get_event(event_id)
        .await?
        .ok_or_else(|| CalError::event_not_found(event_id))?;
    let input = form.validate().map_err(CalError::from)?;

    let reminder = match state
        .store
        .create_reminder(event_id, input, state.clock.now())
        .await
    {
        Ok(reminder) => reminder,
        Err(CalError::Conflict(message)) => {
            info!(
                "Rejected duplicate reminder for event id={} ({})",
                event_id,
                input.minutes_before.label()
            );
            state.flash.error(message).await;
            let view = ReminderFormView {
                event: event.view(state.clock.today()),
                form,
                choices: ReminderChoices::default(),
            };
            return Ok((StatusCode::CONFLICT, render(&state, view).await).into_response());
        }
        Err(err) => return Err(err.into()),
    };

    info!(
        "Reminder id={} set for event id={} ({} via {})",
        reminder.id,
        event_id,
        reminder.minutes_before.label(),
        reminder.reminder_type
    );
    state
        .flash
        .success(format!("Reminder set for \"{}\"!", event.title))
        .await;
    Ok(Redirect::to(&event_detail_path(event_id)).into_response())
}

/// `POST /reminder/{id}/delete/` then back to the owning event.
#[axum::debug_handler]
pub async fn delete_reminder(
    State(state): State<Arc<ApiState>>,
    RecordId(id): RecordId,
) -> Result<Redirect, AppError> {
    let reminder = state
        .store
        .delete_reminder(id)
        .await?
        .ok_or_else(|| CalError::reminder_not_found(id))?;

    info!("Deleted reminder id={}", reminder.id);
    state.flash.success("Reminder deleted successfully!").await;
    Ok(Redirect::to(&event_detail_path(reminder.event_id)))
}

/// `GET /reminder/{id}/delete/` changes nothing and returns to the owning event.
#[axum::debug_handler]
pub async fn delete_reminder_redirect(
    State(state): State<Arc<ApiState>>,
    RecordId(id): RecordId,
) -> Result<Redirect, AppError> {
    let reminder = find_reminder(&state, id).await?;
    Ok(Redirect::to(&event_detail_path(reminder.event_id)))
}
