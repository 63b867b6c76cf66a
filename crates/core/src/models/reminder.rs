use std::{fmt, str::FromStr};

use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::errors::ValidationErrors;
use crate::models::event::{Event, EventView, REQUIRED, non_blank};

/// Message reported when an event already has a reminder with the same lead time.
pub const DUPLICATE_REMINDER: &str = "A reminder with this timing already exists for this event.";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Select a valid choice. {0} is not one of the available choices.")]
pub struct InvalidChoice(pub String);

/// How the user wants to be alerted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReminderType {
    Email,
    #[default]
    Notification,
}

impl ReminderType {
    pub const ALL: [ReminderType; 2] = [ReminderType::Email, ReminderType::Notification];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReminderType::Email => "email",
            ReminderType::Notification => "notification",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ReminderType::Email => "Email",
            ReminderType::Notification => "Notification",
        }
    }
}

impl fmt::Display for ReminderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReminderType {
    type Err = InvalidChoice;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ReminderType::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| InvalidChoice(s.to_string()))
    }
}

/// Lead time before the event at which a reminder is due.
///
/// Serialized as the number of minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(into = "u32", try_from = "u32")]
pub enum LeadTime {
    FiveMinutes,
    #[default]
    FifteenMinutes,
    ThirtyMinutes,
    OneHour,
    OneDay,
    OneWeek,
}

impl LeadTime {
    pub const ALL: [LeadTime; 6] = [
        LeadTime::FiveMinutes,
        LeadTime::FifteenMinutes,
        LeadTime::ThirtyMinutes,
        LeadTime::OneHour,
        LeadTime::OneDay,
        LeadTime::OneWeek,
    ];

    pub fn minutes(&self) -> u32 {
        match self {
            LeadTime::FiveMinutes => 5,
            LeadTime::FifteenMinutes => 15,
            LeadTime::ThirtyMinutes => 30,
            LeadTime::OneHour => 60,
            LeadTime::OneDay => 1440,
            LeadTime::OneWeek => 10080,
        }
    }

    pub fn from_minutes(minutes: u32) -> Option<Self> {
        LeadTime::ALL
            .into_iter()
            .find(|lead| lead.minutes() == minutes)
    }

    pub fn duration(&self) -> Duration {
        Duration::minutes(i64::from(self.minutes()))
    }

    pub fn label(&self) -> &'static str {
        match self {
            LeadTime::FiveMinutes => "5 minutes before",
            LeadTime::FifteenMinutes => "15 minutes before",
            LeadTime::ThirtyMinutes => "30 minutes before",
            LeadTime::OneHour => "1 hour before",
            LeadTime::OneDay => "1 day before",
            LeadTime::OneWeek => "1 week before",
        }
    }
}

impl From<LeadTime> for u32 {
    fn from(lead: LeadTime) -> Self {
        lead.minutes()
    }
}

impl TryFrom<u32> for LeadTime {
    type Error = InvalidChoice;

    fn try_from(minutes: u32) -> Result<Self, Self::Error> {
        LeadTime::from_minutes(minutes).ok_or_else(|| InvalidChoice(minutes.to_string()))
    }
}

impl FromStr for LeadTime {
    type Err = InvalidChoice;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u32>()
            .ok()
            .and_then(LeadTime::from_minutes)
            .ok_or_else(|| InvalidChoice(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reminder {
    pub id: i64,
    pub event_id: i64,
    pub reminder_type: ReminderType,
    pub minutes_before: LeadTime,
    /// Never set by this system; delivery is not implemented.
    pub is_sent: bool,
    pub created_at: DateTime<Utc>,
}

impl Reminder {
    pub fn reminder_time(&self, event: &Event) -> NaiveDateTime {
        reminder_time(event, self.minutes_before)
    }

    pub fn describe(&self, event: &Event) -> String {
        format!(
            "Reminder for {} - {}",
            event.title,
            self.minutes_before.label()
        )
    }

    pub fn view(&self, event: &Event) -> ReminderView {
        ReminderView {
            id: self.id,
            event_id: self.event_id,
            reminder_type: self.reminder_type,
            reminder_type_label: self.reminder_type.label(),
            minutes_before: self.minutes_before,
            minutes_before_label: self.minutes_before.label(),
            is_sent: self.is_sent,
            created_at: self.created_at,
            reminder_time: self.reminder_time(event),
            description: self.describe(event),
        }
    }
}

/// When a reminder with `lead` is due for `event`.
pub fn reminder_time(event: &Event, lead: LeadTime) -> NaiveDateTime {
    event.starts_at() - lead.duration()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReminderView {
    pub id: i64,
    pub event_id: i64,
    pub reminder_type: ReminderType,
    pub reminder_type_label: &'static str,
    pub minutes_before: LeadTime,
    pub minutes_before_label: &'static str,
    pub is_sent: bool,
    pub created_at: DateTime<Utc>,
    pub reminder_time: NaiveDateTime,
    pub description: String,
}

/// Validated values for creating a reminder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReminderInput {
    pub reminder_type: ReminderType,
    pub minutes_before: LeadTime,
}

/// Raw reminder form fields. Both are required; [`ReminderForm::initial`]
/// pre-selects the defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderForm {
    #[serde(default)]
    pub reminder_type: Option<String>,
    #[serde(default)]
    pub minutes_before: Option<String>,
}

impl ReminderForm {
    pub fn initial() -> Self {
        let defaults = ReminderInput::default();
        Self {
            reminder_type: Some(defaults.reminder_type.as_str().to_string()),
            minutes_before: Some(defaults.minutes_before.minutes().to_string()),
        }
    }

    pub fn validate(&self) -> Result<ReminderInput, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let reminder_type = match non_blank(&self.reminder_type) {
            None => {
                errors.add("reminder_type", REQUIRED);
                ReminderType::default()
            }
            Some(raw) => raw.parse::<ReminderType>().unwrap_or_else(|e| {
                errors.add("reminder_type", e.to_string());
                ReminderType::default()
            }),
        };

        let minutes_before = match non_blank(&self.minutes_before) {
            None => {
                errors.add("minutes_before", REQUIRED);
                LeadTime::default()
            }
            Some(raw) => raw.parse::<LeadTime>().unwrap_or_else(|e| {
                errors.add("minutes_before", e.to_string());
                LeadTime::default()
            }),
        };

        errors.into_result(ReminderInput {
            reminder_type,
            minutes_before,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Choice {
    pub value: String,
    pub label: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReminderChoices {
    pub reminder_types: Vec<Choice>,
    pub minutes_before: Vec<Choice>,
}

impl Default for ReminderChoices {
    fn default() -> Self {
        Self {
            reminder_types: ReminderType::ALL
                .into_iter()
                .map(|kind| Choice {
                    value: kind.as_str().to_string(),
                    label: kind.label(),
                })
                .collect(),
            minutes_before: LeadTime::ALL
                .into_iter()
                .map(|lead| Choice {
                    value: lead.minutes().to_string(),
                    label: lead.label(),
                })
                .collect(),
        }
    }
}

/// Context for the set-reminder form.
#[derive(Debug, Clone, Serialize)]
pub struct ReminderFormView {
    pub event: EventView,
    pub form: ReminderForm,
    pub choices: ReminderChoices,
}
