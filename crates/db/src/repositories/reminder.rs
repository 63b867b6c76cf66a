use crate::models::DbReminder;
use chrono::{DateTime, Utc};
use eventcal_core::models::reminder::ReminderInput;
use eyre::Result;
use sqlx::{Pool, Postgres};

const REMINDER_COLUMNS: &str = "id, event_id, reminder_type, minutes_before, is_sent, created_at";

/// Result of attempting to attach a reminder to an event.
#[derive(Debug)]
pub enum InsertOutcome {
    Created(DbReminder),
    /// The event already has a reminder with this lead time.
    Duplicate,
    MissingEvent,
}

pub async fn create_reminder(
    pool: &Pool<Postgres>,
    event_id: i64,
    input: ReminderInput,
    now: DateTime<Utc>,
) -> Result<InsertOutcome> {
    let mut tx = pool.begin().await?;

    // Holds the event row until commit so a concurrent delete cannot interleave.
    let event = sqlx::query_scalar::<_, i64>("SELECT id FROM events WHERE id = $1 FOR SHARE")
        .bind(event_id)
        .fetch_optional(&mut *tx)
        .await?;
    if event.is_none() {
        tx.rollback().await?;
        return Ok(InsertOutcome::MissingEvent);
    }

    let reminder = sqlx::query_as::<_, DbReminder>(&format!(
        r#"
        INSERT INTO reminders (event_id, reminder_type, minutes_before, is_sent, created_at)
        VALUES ($1, $2, $3, FALSE, $4)
        ON CONFLICT (event_id, minutes_before) DO NOTHING
        RETURNING {REMINDER_COLUMNS}
        "#
    ))
    .bind(event_id)
    .bind(input.reminder_type.as_str())
    .bind(input.minutes_before.minutes() as i32)
    .bind(now)
    .fetch_optional(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok(match reminder {
        Some(reminder) => {
            tracing::debug!("Reminder created: id={}, event_id={}", reminder.id, event_id);
            InsertOutcome::Created(reminder)
        }
        None => {
            tracing::debug!(
                "Duplicate reminder rejected: event_id={}, minutes_before={}",
                event_id,
                input.minutes_before.minutes()
            );
            InsertOutcome::Duplicate
        }
    })
}

pub async fn get_reminder_by_id(pool: &Pool<Postgres>, id: i64) -> Result<Option<DbReminder>> {
    let reminder = sqlx::query_as::<_, DbReminder>(&format!(
        r#"
        SELECT {REMINDER_COLUMNS}
        FROM reminders
        WHERE id = $1
        "#
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(reminder)
}

pub async fn delete_reminder(pool: &Pool<Postgres>, id: i64) -> Result<Option<DbReminder>> {
    let reminder = sqlx::query_as::<_, DbReminder>(&format!(
        r#"
        DELETE FROM reminders
        WHERE id = $1
        RETURNING {REMINDER_COLUMNS}
        "#
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(reminder)
}

pub async fn get_reminders_by_event_id(
    pool: &Pool<Postgres>,
    event_id: i64,
) -> Result<Vec<DbReminder>> {
    let reminders = sqlx::query_as::<_, DbReminder>(&format!(
        r#"
        SELECT {REMINDER_COLUMNS}
        FROM reminders
        WHERE event_id = $1
        ORDER BY minutes_before ASC, id ASC
        "#
    ))
    .bind(event_id)
    .fetch_all(pool)
    .await?;

    Ok(reminders)
}
