use chrono::{DateTime, Local, NaiveDate, Utc};

/// Source of the current instant and the host's local date.
///
/// Handlers never read the system clock directly so that "today" dependent
/// behaviour (calendar windows, `is_past`/`is_today`) stays deterministic
/// under test.
pub trait Clock: Send + Sync {
    /// Timestamp used for `created_at` / `updated_at`.
    fn now(&self) -> DateTime<Utc>;

    /// The current calendar date on the host.
    fn today(&self) -> NaiveDate;
}

/// Reads the real system time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// A clock frozen at a given instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    now: DateTime<Utc>,
    today: NaiveDate,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>, today: NaiveDate) -> Self {
        Self { now, today }
    }

    /// Freezes the clock at midday (UTC) of `today`.
    pub fn on(today: NaiveDate) -> Self {
        let now = today
            .and_hms_opt(12, 0, 0)
            .map(|dt| dt.and_utc())
            .unwrap_or_else(Utc::now);
        Self { now, today }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.now
    }

    fn today(&self) -> NaiveDate {
        self.today
    }
}
