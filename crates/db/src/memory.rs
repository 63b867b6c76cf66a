use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use eventcal_core::{
    calendar::sort_events,
    errors::{CalError, CalResult},
    models::{
        event::{Event, EventInput},
        reminder::{DUPLICATE_REMINDER, Reminder, ReminderInput},
    },
};
use tokio::sync::Mutex;

use crate::store::EventStore;

#[derive(Default)]
struct State {
    events: BTreeMap<i64, Event>,
    reminders: BTreeMap<i64, Reminder>,
    last_event_id: i64,
    last_reminder_id: i64,
}

/// A process-local store. Every operation runs under a single lock, so
/// check-then-insert sequences are atomic.
#[derive(Default)]
pub struct InMemoryStore {
    state: Mutex<State>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EventStore for InMemoryStore {
    async fn create_event(&self, input: &EventInput, now: DateTime<Utc>) -> CalResult<Event> {
        let mut state = self.state.lock().await;
        state.last_event_id += 1;
        let event = Event {
            id: state.last_event_id,
            title: input.title.clone(),
            date: input.date,
            time: input.time,
            description: input.description.clone(),
            is_attended: false,
            created_at: now,
            updated_at: now,
        };
        state.events.insert(event.id, event.clone());
        Ok(event)
    }

    async fn get_event(&self, id: i64) -> CalResult<Option<Event>> {
        let state = self.state.lock().await;
        Ok(state.events.get(&id).cloned())
    }

    async fn update_event(
        &self,
        id: i64,
        input: &EventInput,
        now: DateTime<Utc>,
    ) -> CalResult<Option<Event>> {
        let mut state = self.state.lock().await;
        Ok(state.events.get_mut(&id).map(|event| {
            event.title = input.title.clone();
            event.date = input.date;
            event.time = input.time;
            event.description = input.description.clone();
            event.updated_at = now;
            event.clone()
        }))
    }

    async fn delete_event(&self, id: i64) -> CalResult<Option<Event>> {
        let mut state = self.state.lock().await;
        let event = state.events.remove(&id);
        if event.is_some() {
            state.reminders.retain(|_, reminder| reminder.event_id != id);
        }
        Ok(event)
    }

    async fn toggle_attended(&self, id: i64, now: DateTime<Utc>) -> CalResult<Option<Event>> {
        let mut state = self.state.lock().await;
        Ok(state.events.get_mut(&id).map(|event| {
            event.is_attended = !event.is_attended;
            event.updated_at = now;
            event.clone()
        }))
    }

    async fn events_between(&self, start: NaiveDate, end: NaiveDate) -> CalResult<Vec<Event>> {
        let state = self.state.lock().await;
        let mut events: Vec<Event> = state
            .events
            .values()
            .filter(|event| start <= event.date && event.date <= end)
            .cloned()
            .collect();
        sort_events(&mut events);
        Ok(events)
    }

    async fn create_reminder(
        &self,
        event_id: i64,
        input: ReminderInput,
        now: DateTime<Utc>,
    ) -> CalResult<Reminder> {
        let mut state = self.state.lock().await;
        if !state.events.contains_key(&event_id) {
            return Err(CalError::event_not_found(event_id));
        }
        let duplicate = state.reminders.values().any(|reminder| {
            reminder.event_id == event_id && reminder.minutes_before == input.minutes_before
        });
        if duplicate {
            return Err(CalError::Conflict(DUPLICATE_REMINDER.to_string()));
        }

        state.last_reminder_id += 1;
        let reminder = Reminder {
            id: state.last_reminder_id,
            event_id,
            reminder_type: input.reminder_type,
            minutes_before: input.minutes_before,
            is_sent: false,
            created_at: now,
        };
        state.reminders.insert(reminder.id, reminder.clone());
        Ok(reminder)
    }

    async fn get_reminder(&self, id: i64) -> CalResult<Option<Reminder>> {
        let state = self.state.lock().await;
        Ok(state.reminders.get(&id).cloned())
    }

    async fn delete_reminder(&self, id: i64) -> CalResult<Option<Reminder>> {
        let mut state = self.state.lock().await;
        Ok(state.reminders.remove(&id))
    }

    async fn reminders_for_event(&self, event_id: i64) -> CalResult<Vec<Reminder>> {
        let state = self.state.lock().await;
        let mut reminders: Vec<Reminder> = state
            .reminders
            .values()
            .filter(|reminder| reminder.event_id == event_id)
            .cloned()
            .collect();
        reminders.sort_by_key(|reminder| (reminder.minutes_before, reminder.id));
        Ok(reminders)
    }
}
