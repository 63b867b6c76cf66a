use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use eventcal_core::models::{
    event::Event,
    reminder::{LeadTime, Reminder, ReminderType},
};
use eyre::{Result, eyre};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbEvent {
    pub id: i64,
    pub title: String,
    pub date: NaiveDate,
    pub time: Option<NaiveTime>,
    pub description: String,
    pub is_attended: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<DbEvent> for Event {
    fn from(e: DbEvent) -> Self {
        Self {
            id: e.id,
            title: e.title,
            date: e.date,
            time: e.time,
            description: e.description,
            is_attended: e.is_attended,
            created_at: e.created_at,
            updated_at: e.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbReminder {
    pub id: i64,
    pub event_id: i64,
    pub reminder_type: String,
    pub minutes_before: i32,
    pub is_sent: bool,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<DbReminder> for Reminder {
    type Error = eyre::Report;

    fn try_from(r: DbReminder) -> Result<Self> {
        let reminder_type: ReminderType = r
            .reminder_type
            .parse()
            .map_err(|e| eyre!("Invalid reminder_type in row {}: {}", r.id, e))?;
        let minutes_before = u32::try_from(r.minutes_before)
            .ok()
            .and_then(LeadTime::from_minutes)
            .ok_or_else(|| eyre!("Invalid minutes_before in row {}: {}", r.id, r.minutes_before))?;

        Ok(Self {
            id: r.id,
            event_id: r.event_id,
            reminder_type,
            minutes_before,
            is_sent: r.is_sent,
            created_at: r.created_at,
        })
    }
}

/// Converts fetched reminder rows, failing on the first malformed one.
pub fn into_reminders(rows: Vec<DbReminder>) -> Result<Vec<Reminder>> {
    rows.into_iter().map(Reminder::try_from).collect()
}
