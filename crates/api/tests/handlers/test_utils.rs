use std::sync::Arc;

use axum_test::TestServer;
use chrono::{NaiveDate, NaiveTime, Utc};
use eventcal_api::{ApiState, build_router};
use eventcal_core::{
    clock::FixedClock,
    models::{
        event::{Event, EventInput},
        reminder::{LeadTime, Reminder, ReminderInput, ReminderType},
    },
};
use eventcal_db::store::{EventStore, InMemoryStore};

/// Wednesday, so the current week runs 2025-06-02 ..= 2025-06-08.
pub fn today() -> NaiveDate {
    date(2025, 6, 4)
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub fn time(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
}

/// Builds a server around any store, with the clock frozen on [`today`].
pub fn server_with(store: Arc<dyn EventStore>) -> TestServer {
    let state = ApiState::new(store, Arc::new(FixedClock::on(today())));
    TestServer::new(build_router(Arc::new(state))).unwrap()
}

pub struct TestContext {
    pub server: TestServer,
    pub store: Arc<InMemoryStore>,
}

impl TestContext {
    pub fn new() -> Self {
        let store = Arc::new(InMemoryStore::new());
        let server = server_with(store.clone());
        Self { server, store }
    }

    /// Inserts an event directly, bypassing the form.
    pub async fn seed_event(&self, title: &str, date: NaiveDate, time: Option<NaiveTime>) -> Event {
        let input = EventInput {
            title: title.to_string(),
            date,
            time,
            description: String::new(),
        };
        self.store.create_event(&input, Utc::now()).await.unwrap()
    }

    pub async fn seed_reminder(&self, event_id: i64, minutes_before: LeadTime) -> Reminder {
        let input = ReminderInput {
            reminder_type: ReminderType::Notification,
            minutes_before,
        };
        self.store
            .create_reminder(event_id, input, Utc::now())
            .await
            .unwrap()
    }
}
