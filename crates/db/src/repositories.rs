pub mod event;
pub mod reminder;
