pub mod calendar;
pub mod event;
pub mod health;
pub mod reminder;
