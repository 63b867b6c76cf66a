//! Storage seam used by the HTTP layer.
//!
//! [`PgStore`] delegates to the repository functions; [`InMemoryStore`] keeps
//! everything behind one lock and backs the handler tests.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use eventcal_core::{
    errors::{CalError, CalResult},
    models::{
        event::{Event, EventInput},
        reminder::{DUPLICATE_REMINDER, Reminder, ReminderInput},
    },
};

use crate::{
    DbPool,
    models::into_reminders,
    repositories::{self, reminder::InsertOutcome},
};

pub use crate::memory::InMemoryStore;

#[async_trait]
pub trait EventStore: Send + Sync {
    async fn create_event(&self, input: &EventInput, now: DateTime<Utc>) -> CalResult<Event>;

    async fn get_event(&self, id: i64) -> CalResult<Option<Event>>;

    async fn update_event(
        &self,
        id: i64,
        input: &EventInput,
        now: DateTime<Utc>,
    ) -> CalResult<Option<Event>>;

    /// Removes the event and all of its reminders. `None` if it did not exist.
    async fn delete_event(&self, id: i64) -> CalResult<Option<Event>>;

    async fn toggle_attended(&self, id: i64, now: DateTime<Utc>) -> CalResult<Option<Event>>;

    /// Events dated within `[start, end]`, ordered by date then time (all-day first).
    async fn events_between(&self, start: NaiveDate, end: NaiveDate) -> CalResult<Vec<Event>>;

    /// Fails with `NotFound` when the event is missing and `Conflict` when it
    /// already has a reminder with the same lead time.
    async fn create_reminder(
        &self,
        event_id: i64,
        input: ReminderInput,
        now: DateTime<Utc>,
    ) -> CalResult<Reminder>;

    async fn get_reminder(&self, id: i64) -> CalResult<Option<Reminder>>;

    async fn delete_reminder(&self, id: i64) -> CalResult<Option<Reminder>>;

    /// Reminders owned by the event, ordered by lead time.
    async fn reminders_for_event(&self, event_id: i64) -> CalResult<Vec<Reminder>>;
}

/// PostgreSQL-backed store.
#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EventStore for PgStore {
    async fn create_event(&self, input: &EventInput, now: DateTime<Utc>) -> CalResult<Event> {
        let event = repositories::event::create_event(&self.pool, input, now).await?;
        Ok(event.into())
    }

    async fn get_event(&self, id: i64) -> CalResult<Option<Event>> {
        let event = repositories::event::get_event_by_id(&self.pool, id).await?;
        Ok(event.map(Into::into))
    }

    async fn update_event(
        &self,
        id: i64,
        input: &EventInput,
        now: DateTime<Utc>,
    ) -> CalResult<Option<Event>> {
        let event = repositories::event::update_event(&self.pool, id, input, now).await?;
        Ok(event.map(Into::into))
    }

    async fn delete_event(&self, id: i64) -> CalResult<Option<Event>> {
        let event = repositories::event::delete_event(&self.pool, id).await?;
        Ok(event.map(Into::into))
    }

    async fn toggle_attended(&self, id: i64, now: DateTime<Utc>) -> CalResult<Option<Event>> {
        let event = repositories::event::toggle_attended(&self.pool, id, now).await?;
        Ok(event.map(Into::into))
    }

    async fn events_between(&self, start: NaiveDate, end: NaiveDate) -> CalResult<Vec<Event>> {
        let events = repositories::event::get_events_between(&self.pool, start, end).await?;
        Ok(events.into_iter().map(Into::into).collect())
    }

    async fn create_reminder(
        &self,
        event_id: i64,
        input: ReminderInput,
        now: DateTime<Utc>,
    ) -> CalResult<Reminder> {
        match repositories::reminder::create_reminder(&self.pool, event_id, input, now).await? {
            InsertOutcome::Created(row) => Ok(Reminder::try_from(row)?),
            InsertOutcome::Duplicate => Err(CalError::Conflict(DUPLICATE_REMINDER.to_string())),
            InsertOutcome::MissingEvent => Err(CalError::event_not_found(event_id)),
        }
    }

    async fn get_reminder(&self, id: i64) -> CalResult<Option<Reminder>> {
        let row = repositories::reminder::get_reminder_by_id(&self.pool, id).await?;
        Ok(row.map(Reminder::try_from).transpose()?)
    }

    async fn delete_reminder(&self, id: i64) -> CalResult<Option<Reminder>> {
        let row = repositories::reminder::delete_reminder(&self.pool, id).await?;
        Ok(row.map(Reminder::try_from).transpose()?)
    }

    async fn reminders_for_event(&self, event_id: i64) -> CalResult<Vec<Reminder>> {
        let rows = repositories::reminder::get_reminders_by_event_id(&self.pool, event_id).await?;
        Ok(into_reminders(rows)?)
    }
}
