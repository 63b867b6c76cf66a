use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    // Create events table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS events (
            id BIGSERIAL PRIMARY KEY,
            title VARCHAR(100) NOT NULL,
            date DATE NOT NULL,
            time TIME NULL,
            description TEXT NOT NULL DEFAULT '',
            is_attended BOOLEAN NOT NULL DEFAULT FALSE,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create reminders table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS reminders (
            id BIGSERIAL PRIMARY KEY,
            event_id BIGINT NOT NULL REFERENCES events(id) ON DELETE CASCADE,
            reminder_type VARCHAR(20) NOT NULL DEFAULT 'notification',
            minutes_before INTEGER NOT NULL DEFAULT 15,
            is_sent BOOLEAN NOT NULL DEFAULT FALSE,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT reminders_event_minutes_unique UNIQUE (event_id, minutes_before),
            CONSTRAINT valid_reminder_type CHECK (reminder_type IN ('email', 'notification')),
            CONSTRAINT valid_minutes_before CHECK (minutes_before IN (5, 15, 30, 60, 1440, 10080))
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create indexes
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_events_date ON events(date, time);")
        .execute(pool)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_reminders_event_id ON reminders(event_id);")
        .execute(pool)
        .await?;

    info!("Database schema initialized successfully.");
    Ok(())
}
