use crate::models::DbEvent;
use chrono::{DateTime, NaiveDate, Utc};
use eventcal_core::models::event::EventInput;
use eyre::Result;
use sqlx::{Pool, Postgres};

const EVENT_COLUMNS: &str =
    "id, title, date, time, description, is_attended, created_at, updated_at";

pub async fn create_event(
    pool: &Pool<Postgres>,
    input: &EventInput,
    now: DateTime<Utc>,
) -> Result<DbEvent> {
    tracing::debug!(
        "Creating event: title={}, date={}, time={:?}",
        input.title, input.date, input.time
    );

    let event = sqlx::query_as::<_, DbEvent>(&format!(
        r#"
        INSERT INTO events (title, date, time, description, is_attended, created_at, updated_at)
        VALUES ($1, $2, $3, $4, FALSE, $5, $5)
        RETURNING {EVENT_COLUMNS}
        "#
    ))
    .bind(&input.title)
    .bind(input.date)
    .bind(input.time)
    .bind(&input.description)
    .bind(now)
    .fetch_one(pool)
    .await?;

    tracing::debug!("Event created successfully: id={}", event.id);
    Ok(event)
}

pub async fn get_event_by_id(pool: &Pool<Postgres>, id: i64) -> Result<Option<DbEvent>> {
    tracing::debug!("Getting event by id: {}", id);

    let event = sqlx::query_as::<_, DbEvent>(&format!(
        r#"
        SELECT {EVENT_COLUMNS}
        FROM events
        WHERE id = $1
        "#
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(event)
}

pub async fn update_event(
    pool: &Pool<Postgres>,
    id: i64,
    input: &EventInput,
    now: DateTime<Utc>,
) -> Result<Option<DbEvent>> {
    let event = sqlx::query_as::<_, DbEvent>(&format!(
        r#"
        UPDATE events
        SET title = $2, date = $3, time = $4, description = $5, updated_at = $6
        WHERE id = $1
        RETURNING {EVENT_COLUMNS}
        "#
    ))
    .bind(id)
    .bind(&input.title)
    .bind(input.date)
    .bind(input.time)
    .bind(&input.description)
    .bind(now)
    .fetch_optional(pool)
    .await?;

    Ok(event)
}

/// Deletes an event and every reminder it owns in one transaction.
pub async fn delete_event(pool: &Pool<Postgres>, id: i64) -> Result<Option<DbEvent>> {
    let mut tx = pool.begin().await?;

    let reminders = sqlx::query("DELETE FROM reminders WHERE event_id = $1")
        .bind(id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    let event = sqlx::query_as::<_, DbEvent>(&format!(
        r#"
        DELETE FROM events
        WHERE id = $1
        RETURNING {EVENT_COLUMNS}
        "#
    ))
    .bind(id)
    .fetch_optional(&mut *tx)
    .await?;

    match event {
        Some(event) => {
            tx.commit().await?;
            tracing::debug!("Deleted event id={} with {} reminders", id, reminders);
            Ok(Some(event))
        }
        None => {
            tx.rollback().await?;
            Ok(None)
        }
    }
}

pub async fn toggle_attended(
    pool: &Pool<Postgres>,
    id: i64,
    now: DateTime<Utc>,
) -> Result<Option<DbEvent>> {
    let event = sqlx::query_as::<_, DbEvent>(&format!(
        r#"
        UPDATE events
        SET is_attended = NOT is_attended, updated_at = $2
        WHERE id = $1
        RETURNING {EVENT_COLUMNS}
        "#
    ))
    .bind(id)
    .bind(now)
    .fetch_optional(pool)
    .await?;

    Ok(event)
}

pub async fn get_events_between(
    pool: &Pool<Postgres>,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<DbEvent>> {
    let events = sqlx::query_as::<_, DbEvent>(&format!(
        r#"
        SELECT {EVENT_COLUMNS}
        FROM events
        WHERE date BETWEEN $1 AND $2
        ORDER BY date ASC, time ASC NULLS FIRST, id ASC
        "#
    ))
    .bind(start)
    .bind(end)
    .fetch_all(pool)
    .await?;

    Ok(events)
}
