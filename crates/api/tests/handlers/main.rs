mod test_utils;

mod event_test;
mod reminder_test;
