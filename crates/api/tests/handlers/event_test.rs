use axum::http::StatusCode;
use eventcal_core::models::reminder::LeadTime;
use eventcal_db::store::EventStore;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

use crate::test_utils::{TestContext, date, time};

#[tokio::test]
async fn add_form_defaults_date_to_today() {
    let ctx = TestContext::new();

    let page = ctx.server.get("/add/").await.json::<Value>();
    assert_eq!(page["form"]["date"], "2025-06-04");
    assert_eq!(page["form"]["title"], Value::Null);
    assert!(page.get("event").is_none());
}

#[tokio::test]
async fn created_event_appears_in_month_view() {
    let ctx = TestContext::new();

    let response = ctx
        .server
        .post("/add/")
        .form(&[("title", "Standup"), ("date", "2025-06-02")])
        .await;
    assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
    assert_eq!(response.header("location").to_str().unwrap(), "/");

    let page = ctx
        .server
        .get("/")
        .add_query_params(&[("view", "month"), ("year", "2025"), ("month", "6")])
        .await
        .json::<Value>();
    let bucket = page["events_by_date"]["2025-06-02"].as_array().unwrap();
    assert_eq!(bucket.len(), 1);
    assert_eq!(bucket[0]["title"], "Standup");
    assert_eq!(bucket[0]["time"], Value::Null);
    assert_eq!(bucket[0]["description"], "");
    assert_eq!(
        page["messages"],
        json!([{
            "level": "success",
            "text": "Event \"Standup\" has been created successfully!"
        }])
    );

    // Messages are shown once.
    let page = ctx.server.get("/").await.json::<Value>();
    assert_eq!(page["messages"], json!([]));
}

#[tokio::test]
async fn create_accepts_alternate_formats() {
    let ctx = TestContext::new();

    let response = ctx
        .server
        .post("/add/")
        .form(&[
            ("title", "Dentist"),
            ("date", "06/10/2025"),
            ("time", "14:30"),
            ("description", "Bring the form"),
        ])
        .await;
    assert_eq!(response.status_code(), StatusCode::SEE_OTHER);

    let event = ctx.store.get_event(1).await.unwrap().unwrap();
    assert_eq!(event.date, date(2025, 6, 10));
    assert_eq!(event.time, Some(time(14, 30)));
    assert_eq!(event.description, "Bring the form");
}

#[tokio::test]
async fn invalid_form_is_rejected_without_saving() {
    let ctx = TestContext::new();
    let long_title = "x".repeat(101);

    let response = ctx
        .server
        .post("/add/")
        .form(&[
            ("title", long_title.as_str()),
            ("date", "2025-02-30"),
            ("time", "25:00"),
        ])
        .await;
    assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = response.json::<Value>();
    assert_eq!(body["error"], "Validation error");
    assert_eq!(
        body["fields"]["title"][0],
        "Ensure this value has at most 100 characters (it has 101)."
    );
    assert_eq!(body["fields"]["date"][0], "Enter a valid date.");
    assert_eq!(body["fields"]["time"][0], "Enter a valid time.");
    assert_eq!(ctx.store.get_event(1).await.unwrap(), None);
}

#[tokio::test]
async fn missing_required_fields() {
    let ctx = TestContext::new();

    let response = ctx.server.post("/add/").form(&[("title", "  ")]).await;
    assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = response.json::<Value>();
    assert_eq!(body["fields"]["title"][0], "This field is required.");
    assert_eq!(body["fields"]["date"][0], "This field is required.");
    assert!(body["fields"].get("time").is_none());
}

#[tokio::test]
async fn detail_lists_reminders() {
    let ctx = TestContext::new();
    let event = ctx
        .seed_event("Standup", date(2025, 3, 10), Some(time(9, 0)))
        .await;
    ctx.seed_reminder(event.id, LeadTime::OneDay).await;
    ctx.seed_reminder(event.id, LeadTime::FifteenMinutes).await;

    let response = ctx.server.get(&format!("/event/{}/", event.id)).await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let page = response.json::<Value>();
    assert_eq!(page["event"]["title"], "Standup");
    assert_eq!(page["event"]["is_past"], true);
    let reminders = page["reminders"].as_array().unwrap();
    assert_eq!(reminders.len(), 2);
    assert_eq!(reminders[0]["minutes_before"], 15);
    assert_eq!(reminders[0]["reminder_time"], "2025-03-10T08:45:00");
    assert_eq!(reminders[1]["minutes_before"], 1440);
    assert_eq!(reminders[1]["description"], "Reminder for Standup - 1 day before");
}

#[tokio::test]
async fn unknown_event_is_not_found() {
    let ctx = TestContext::new();

    for uri in [
        "/event/99/",
        "/event/99/edit/",
        "/event/99/delete/",
        "/event/99/mark-attended/",
        "/event/99/set-reminder/",
    ] {
        let response = ctx.server.get(uri).await;
        assert_eq!(response.status_code(), StatusCode::NOT_FOUND, "{}", uri);
    }

    let response = ctx.server.post("/event/99/delete/").await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(
        response.json::<Value>()["error"],
        "Resource not found: Event with ID 99 not found"
    );
}

#[tokio::test]
async fn edit_form_is_prefilled() {
    let ctx = TestContext::new();
    let event = ctx
        .seed_event("Standup", date(2025, 6, 2), Some(time(9, 15)))
        .await;

    let page = ctx
        .server
        .get(&format!("/event/{}/edit/", event.id))
        .await
        .json::<Value>();
    assert_eq!(page["form"]["title"], "Standup");
    assert_eq!(page["form"]["date"], "2025-06-02");
    assert_eq!(page["form"]["time"], "09:15");
    assert_eq!(page["event"]["id"], event.id);
}

#[tokio::test]
async fn edit_updates_event() {
    let ctx = TestContext::new();
    let event = ctx
        .seed_event("Standup", date(2025, 6, 2), Some(time(9, 0)))
        .await;

    let response = ctx
        .server
        .post(&format!("/event/{}/edit/", event.id))
        .form(&[("title", "Retro"), ("date", "2025-06-06")])
        .await;
    assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
    assert_eq!(response.header("location").to_str().unwrap(), "/");

    let updated = ctx.store.get_event(event.id).await.unwrap().unwrap();
    assert_eq!(updated.title, "Retro");
    assert_eq!(updated.date, date(2025, 6, 6));
    assert_eq!(updated.time, None);
    assert_eq!(updated.created_at, event.created_at);

    let page = ctx.server.get("/").await.json::<Value>();
    assert_eq!(
        page["messages"][0]["text"],
        "Event \"Retro\" has been updated successfully!"
    );
}

#[tokio::test]
async fn invalid_edit_keeps_event() {
    let ctx = TestContext::new();
    let event = ctx.seed_event("Standup", date(2025, 6, 2), None).await;

    let response = ctx
        .server
        .post(&format!("/event/{}/edit/", event.id))
        .form(&[("title", ""), ("date", "2025-06-06")])
        .await;
    assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(ctx.store.get_event(event.id).await.unwrap(), Some(event));
}

#[tokio::test]
async fn delete_requires_post_and_removes_reminders() {
    let ctx = TestContext::new();
    let event = ctx.seed_event("Standup", date(2025, 6, 2), None).await;
    let reminder = ctx.seed_reminder(event.id, LeadTime::OneHour).await;

    let confirm = ctx.server.get(&format!("/event/{}/delete/", event.id)).await;
    assert_eq!(confirm.status_code(), StatusCode::OK);
    assert_eq!(confirm.json::<Value>()["event"]["title"], "Standup");
    assert!(ctx.store.get_event(event.id).await.unwrap().is_some());

    let response = ctx.server.post(&format!("/event/{}/delete/", event.id)).await;
    assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
    assert_eq!(response.header("location").to_str().unwrap(), "/");
    assert_eq!(ctx.store.get_event(event.id).await.unwrap(), None);
    assert_eq!(ctx.store.get_reminder(reminder.id).await.unwrap(), None);

    let page = ctx.server.get("/").await.json::<Value>();
    assert_eq!(
        page["messages"][0]["text"],
        "Event \"Standup\" has been deleted successfully!"
    );
}

#[tokio::test]
async fn mark_attended_redirects_with_message() {
    let ctx = TestContext::new();
    let event = ctx.seed_event("Standup", date(2025, 6, 2), None).await;

    let response = ctx
        .server
        .post(&format!("/event/{}/mark-attended/", event.id))
        .await;
    assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
    assert_eq!(response.header("location").to_str().unwrap(), "/");
    assert!(ctx.store.get_event(event.id).await.unwrap().unwrap().is_attended);

    let page = ctx.server.get("/").await.json::<Value>();
    assert_eq!(
        page["messages"][0]["text"],
        "Event \"Standup\" marked as attended!"
    );
}

#[tokio::test]
async fn mark_attended_get_changes_nothing() {
    let ctx = TestContext::new();
    let event = ctx.seed_event("Standup", date(2025, 6, 2), None).await;

    let response = ctx
        .server
        .get(&format!("/event/{}/mark-attended/", event.id))
        .await;
    assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
    assert!(!ctx.store.get_event(event.id).await.unwrap().unwrap().is_attended);
}
