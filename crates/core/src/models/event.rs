use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::ValidationErrors;
use crate::models::reminder::ReminderView;

/// Longest accepted event title, in characters.
pub const TITLE_MAX_LENGTH: usize = 100;

const DATE_INPUT_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y"];
const TIME_INPUT_FORMATS: &[&str] = &["%H:%M:%S%.f", "%H:%M"];

pub(crate) const REQUIRED: &str = "This field is required.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: i64,
    pub title: String,
    pub date: NaiveDate,
    /// `None` marks an all-day event.
    pub time: Option<NaiveTime>,
    pub description: String,
    pub is_attended: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Event {
    pub fn is_past(&self, today: NaiveDate) -> bool {
        self.date < today
    }

    pub fn is_today(&self, today: NaiveDate) -> bool {
        self.date == today
    }

    /// The moment the event begins; all-day events begin at midnight.
    pub fn starts_at(&self) -> NaiveDateTime {
        self.date.and_time(self.time.unwrap_or(NaiveTime::MIN))
    }

    /// Wording used in status messages after an attendance toggle.
    pub fn attendance_status(&self) -> &'static str {
        if self.is_attended {
            "attended"
        } else {
            "not attended"
        }
    }

    pub fn view(&self, today: NaiveDate) -> EventView {
        EventView {
            event: self.clone(),
            is_past: self.is_past(today),
            is_today: self.is_today(today),
        }
    }

    /// Form values that reproduce this event when submitted unchanged.
    pub fn to_form(&self) -> EventForm {
        EventForm {
            title: Some(self.title.clone()),
            date: Some(self.date.format("%Y-%m-%d").to_string()),
            time: self.time.map(format_time),
            description: Some(self.description.clone()),
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.title, self.date)
    }
}

fn format_time(time: NaiveTime) -> String {
    if time.second() == 0 && time.nanosecond() == 0 {
        time.format("%H:%M").to_string()
    } else {
        time.format("%H:%M:%S").to_string()
    }
}

/// Validated values for creating or updating an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventInput {
    pub title: String,
    pub date: NaiveDate,
    pub time: Option<NaiveTime>,
    pub description: String,
}

/// Raw event form fields as submitted by the client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventForm {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl EventForm {
    pub fn validate(&self) -> Result<EventInput, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let title = non_blank(&self.title).unwrap_or_default().to_string();
        if title.is_empty() {
            errors.add("title", REQUIRED);
        } else {
            let length = title.chars().count();
            if length > TITLE_MAX_LENGTH {
                errors.add(
                    "title",
                    format!(
                        "Ensure this value has at most {} characters (it has {}).",
                        TITLE_MAX_LENGTH, length
                    ),
                );
            }
        }

        let date = match non_blank(&self.date) {
            None => {
                errors.add("date", REQUIRED);
                None
            }
            Some(raw) => {
                let parsed = parse_date(raw);
                if parsed.is_none() {
                    errors.add("date", "Enter a valid date.");
                }
                parsed
            }
        };

        let time = match non_blank(&self.time) {
            None => None,
            Some(raw) => {
                let parsed = parse_time(raw);
                if parsed.is_none() {
                    errors.add("time", "Enter a valid time.");
                }
                parsed
            }
        };

        let description = self
            .description
            .as_deref()
            .map(str::trim)
            .unwrap_or_default()
            .to_string();

        match date {
            Some(date) => errors.into_result(EventInput {
                title,
                date,
                time,
                description,
            }),
            None => Err(errors),
        }
    }
}

pub(crate) fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    DATE_INPUT_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
}

pub fn parse_time(raw: &str) -> Option<NaiveTime> {
    TIME_INPUT_FORMATS
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(raw, format).ok())
}

/// An event together with the flags derived from the current date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventView {
    #[serde(flatten)]
    pub event: Event,
    pub is_past: bool,
    pub is_today: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct EventDetailView {
    pub event: EventView,
    pub reminders: Vec<ReminderView>,
}

/// Context for the add and edit forms.
#[derive(Debug, Clone, Serialize)]
pub struct EventFormView {
    pub form: EventForm,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event: Option<EventView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DeleteEventView {
    pub event: EventView,
}

/// Body returned to asynchronous callers of the attendance toggle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceResponse {
    pub success: bool,
    pub is_attended: bool,
    pub message: String,
}

impl AttendanceResponse {
    pub fn for_event(event: &Event) -> Self {
        Self {
            success: true,
            is_attended: event.is_attended,
            message: format!("Event marked as {}!", event.attendance_status()),
        }
    }
}
