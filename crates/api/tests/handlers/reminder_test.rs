use axum::http::StatusCode;
use eventcal_core::models::reminder::{LeadTime, ReminderType};
use eventcal_db::store::EventStore;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

use crate::test_utils::{TestContext, date, time};

#[tokio::test]
async fn form_offers_choices_with_defaults() {
    let ctx = TestContext::new();
    let event = ctx.seed_event("Standup", date(2025, 6, 2), None).await;

    let page = ctx
        .server
        .get(&format!("/event/{}/set-reminder/", event.id))
        .await
        .json::<Value>();
    assert_eq!(page["event"]["title"], "Standup");
    assert_eq!(page["form"]["reminder_type"], "notification");
    assert_eq!(page["form"]["minutes_before"], "15");

    let leads: Vec<&str> = page["choices"]["minutes_before"]
        .as_array()
        .unwrap()
        .iter()
        .map(|choice| choice["value"].as_str().unwrap())
        .collect();
    assert_eq!(leads, vec!["5", "15", "30", "60", "1440", "10080"]);
    assert_eq!(page["choices"]["reminder_types"][0]["label"], "Email");
}

#[tokio::test]
async fn set_reminder_redirects_to_event() {
    let ctx = TestContext::new();
    let event = ctx
        .seed_event("Standup", date(2025, 6, 2), Some(time(9, 0)))
        .await;

    let response = ctx
        .server
        .post(&format!("/event/{}/set-reminder/", event.id))
        .form(&[("reminder_type", "email"), ("minutes_before", "60")])
        .await;
    assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.header("location").to_str().unwrap(),
        format!("/event/{}/", event.id)
    );

    let reminders = ctx.store.reminders_for_event(event.id).await.unwrap();
    assert_eq!(reminders.len(), 1);
    assert_eq!(reminders[0].reminder_type, ReminderType::Email);
    assert_eq!(reminders[0].minutes_before, LeadTime::OneHour);
    assert!(!reminders[0].is_sent);

    let page = ctx
        .server
        .get(&format!("/event/{}/", event.id))
        .await
        .json::<Value>();
    assert_eq!(page["messages"][0]["text"], "Reminder set for \"Standup\"!");
    assert_eq!(page["reminders"][0]["reminder_time"], "2025-06-02T08:00:00");
}

#[tokio::test]
async fn blank_fields_are_required() {
    let ctx = TestContext::new();
    let event = ctx.seed_event("Standup", date(2025, 6, 2), None).await;

    let response = ctx
        .server
        .post(&format!("/event/{}/set-reminder/", event.id))
        .form(&[("reminder_type", ""), ("minutes_before", "")])
        .await;
    assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = response.json::<Value>();
    assert_eq!(body["fields"]["reminder_type"][0], "This field is required.");
    assert_eq!(body["fields"]["minutes_before"][0], "This field is required.");
    assert!(ctx.store.reminders_for_event(event.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn invalid_choice_is_rejected() {
    let ctx = TestContext::new();
    let event = ctx.seed_event("Standup", date(2025, 6, 2), None).await;

    let response = ctx
        .server
        .post(&format!("/event/{}/set-reminder/", event.id))
        .form(&[("reminder_type", "sms"), ("minutes_before", "45")])
        .await;
    assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = response.json::<Value>();
    assert_eq!(
        body["fields"]["reminder_type"][0],
        "Select a valid choice. sms is not one of the available choices."
    );
    assert_eq!(
        body["fields"]["minutes_before"][0],
        "Select a valid choice. 45 is not one of the available choices."
    );
    assert!(ctx.store.reminders_for_event(event.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn duplicate_lead_time_serves_form_with_error() {
    let ctx = TestContext::new();
    let event = ctx.seed_event("Standup", date(2025, 6, 2), None).await;
    ctx.seed_reminder(event.id, LeadTime::OneHour).await;

    let response = ctx
        .server
        .post(&format!("/event/{}/set-reminder/", event.id))
        .form(&[("reminder_type", "email"), ("minutes_before", "60")])
        .await;
    assert_eq!(response.status_code(), StatusCode::CONFLICT);

    let page = response.json::<Value>();
    assert_eq!(
        page["messages"],
        json!([{
            "level": "error",
            "text": "A reminder with this timing already exists for this event."
        }])
    );
    assert_eq!(page["event"]["title"], "Standup");
    assert_eq!(page["form"]["reminder_type"], "email");
    assert_eq!(page["form"]["minutes_before"], "60");
    assert!(page["choices"]["minutes_before"].is_array());

    let reminders = ctx.store.reminders_for_event(event.id).await.unwrap();
    assert_eq!(reminders.len(), 1);
    assert_eq!(reminders[0].reminder_type, ReminderType::Notification);

    // The message was shown with the form and is not repeated.
    let page = ctx
        .server
        .get(&format!("/event/{}/", event.id))
        .await
        .json::<Value>();
    assert_eq!(page["messages"], json!([]));

    // A different lead time is still accepted.
    let response = ctx
        .server
        .post(&format!("/event/{}/set-reminder/", event.id))
        .form(&[("reminder_type", "notification"), ("minutes_before", "1440")])
        .await;
    assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
    assert_eq!(ctx.store.reminders_for_event(event.id).await.unwrap().len(), 2);
}

#[tokio::test]
async fn reminder_for_missing_event_is_not_found() {
    let ctx = TestContext::new();

    let response = ctx
        .server
        .post("/event/42/set-reminder/")
        .form(&[("reminder_type", "email"), ("minutes_before", "15")])
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_reminder_returns_to_event() {
    let ctx = TestContext::new();
    let event = ctx.seed_event("Standup", date(2025, 6, 2), None).await;
    let keep = ctx.seed_reminder(event.id, LeadTime::OneDay).await;
    let reminder = ctx.seed_reminder(event.id, LeadTime::FiveMinutes).await;

    let response = ctx
        .server
        .post(&format!("/reminder/{}/delete/", reminder.id))
        .await;
    assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.header("location").to_str().unwrap(),
        format!("/event/{}/", event.id)
    );
    assert_eq!(ctx.store.get_reminder(reminder.id).await.unwrap(), None);
    assert_eq!(
        ctx.store.reminders_for_event(event.id).await.unwrap(),
        vec![keep]
    );

    let page = ctx
        .server
        .get(&format!("/event/{}/", event.id))
        .await
        .json::<Value>();
    assert_eq!(page["messages"][0]["text"], "Reminder deleted successfully!");
}

#[tokio::test]
async fn delete_reminder_get_changes_nothing() {
    let ctx = TestContext::new();
    let event = ctx.seed_event("Standup", date(2025, 6, 2), None).await;
    let reminder = ctx.seed_reminder(event.id, LeadTime::OneDay).await;

    let response = ctx
        .server
        .get(&format!("/reminder/{}/delete/", reminder.id))
        .await;
    assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
    assert_eq!(
        ctx.store.get_reminder(reminder.id).await.unwrap(),
        Some(reminder)
    );

    let response = ctx.server.get("/reminder/999/delete/").await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    let response = ctx.server.post("/reminder/999/delete/").await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}
