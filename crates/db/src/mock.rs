use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use eventcal_core::{
    errors::CalResult,
    models::{
        event::{Event, EventInput},
        reminder::{Reminder, ReminderInput},
    },
};
use mockall::mock;

use crate::store::EventStore;

// Mock store for testing failure paths without a database
mock! {
    pub Store {}

    #[async_trait]
    impl EventStore for Store {
        async fn create_event(&self, input: &EventInput, now: DateTime<Utc>) -> CalResult<Event>;
        async fn get_event(&self, id: i64) -> CalResult<Option<Event>>;
        async fn update_event(
            &self,
            id: i64,
            input: &EventInput,
            now: DateTime<Utc>,
        ) -> CalResult<Option<Event>>;
        async fn delete_event(&self, id: i64) -> CalResult<Option<Event>>;
        async fn toggle_attended(&self, id: i64, now: DateTime<Utc>) -> CalResult<Option<Event>>;
        async fn events_between(&self, start: NaiveDate, end: NaiveDate) -> CalResult<Vec<Event>>;
        async fn create_reminder(
            &self,
            event_id: i64,
            input: ReminderInput,
            now: DateTime<Utc>,
        ) -> CalResult<Reminder>;
        async fn get_reminder(&self, id: i64) -> CalResult<Option<Reminder>>;
        async fn delete_reminder(&self, id: i64) -> CalResult<Option<Reminder>>;
        async fn reminders_for_event(&self, event_id: i64) -> CalResult<Vec<Reminder>>;
    }
}
