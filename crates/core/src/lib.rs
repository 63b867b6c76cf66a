//! # EventCal Core
//!
//! Domain types shared by the storage and HTTP layers: events, reminders,
//! form validation, the calendar window resolver and the error type.

pub mod calendar;
pub mod clock;
pub mod errors;
pub mod models;
