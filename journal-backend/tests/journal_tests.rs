// tests/journal_tests.rs
use axum::http::StatusCode;
use chrono::Utc;
use common::app_helper::TestApp;
use common::auth_helper::test_user;
use common::request::{empty_request, json_request, read_json};
use common::test_data::{date, journal_entry};
use journal_backend::domain::journal_entry_model;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter};
use serde_json::json;
use tower::ServiceExt;
use uuid::Uuid;

mod common;

#[tokio::test]
async fn test_get_entry_requires_date() {
    let app = TestApp::new().await;
    let (_, token) = test_user();

    let res = app
        .router
        .oneshot(empty_request("GET", "/api/journal/entries", Some(&token)))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let json = read_json(res).await;
    assert_eq!(json["error"], "Date parameter is required");
}

#[tokio::test]
async fn test_get_entry_returns_null_when_missing() {
    let app = TestApp::new().await;
    let (_, token) = test_user();

    let res = app
        .router
        .oneshot(empty_request(
            "GET",
            "/api/journal/entries?date=2025-03-01",
            Some(&token),
        ))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let json = read_json(res).await;
    assert!(json["entry"].is_null());
}

#[tokio::test]
async fn test_get_entry_returns_saved_entry() {
    let app = TestApp::new().await;
    let (user_id, token) = test_user();
    let entry = journal_entry(user_id, date("2025-03-01"), Some("Morning coffee"));
    journal_entry_model::ActiveModel::from(entry.clone())
        .insert(app.conn())
        .await
        .unwrap();

    // 他ユーザーの同日エントリは見えない
    let other = journal_entry(Uuid::new_v4(), date("2025-03-01"), Some("Not mine"));
    journal_entry_model::ActiveModel::from(other)
        .insert(app.conn())
        .await
        .unwrap();

    let res = app
        .router
        .clone()
        .oneshot(empty_request(
            "GET",
            "/api/journal/entries?date=2025-03-01",
            Some(&token),
        ))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let json = read_json(res).await;
    assert_eq!(json["entry"]["gratitude"], "Morning coffee");
    assert_eq!(json["entry"]["entry_date"], "2025-03-01");
    assert_eq!(json["entry"]["id"], entry.id.to_string());
}

#[tokio::test]
async fn test_save_entry_requires_entry_date() {
    let app = TestApp::new().await;
    let (_, token) = test_user();

    let res = app
        .router
        .oneshot(json_request(
            "POST",
            "/api/journal/entries",
            Some(&token),
            &json!({ "gratitude": "Sunshine" }),
        ))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let json = read_json(res).await;
    assert_eq!(json["error"], "Entry date is required");
}

#[tokio::test]
async fn test_save_entry_rejects_malformed_date() {
    let app = TestApp::new().await;
    let (_, token) = test_user();

    let res = app
        .router
        .oneshot(json_request(
            "POST",
            "/api/journal/entries",
            Some(&token),
            &json!({ "entry_date": "03/01/2025" }),
        ))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_save_entry_computes_day_number_and_streak() {
    let app = TestApp::new().await;
    let (user_id, token) = test_user();
    for (raw, text) in [("2025-03-01", "Day one"), ("2025-03-04", "Yesterday")] {
        journal_entry_model::ActiveModel::from(journal_entry(user_id, date(raw), Some(text)))
            .insert(app.conn())
            .await
            .unwrap();
    }

    let res = app
        .router
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/journal/entries",
            Some(&token),
            &json!({
                "entry_date": "2025-03-05",
                "gratitude": "Shipping",
                "priority_1": "  ",
                "tasks": [{ "text": "Write tests", "done": false }],
            }),
        ))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let json = read_json(res).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["entry"]["day_number"], 5);
    assert_eq!(json["entry"]["streak"], 2);
    assert!(json["entry"]["priority_1"].is_null());

    let stored = journal_entry_model::Entity::find()
        .filter(journal_entry_model::Column::UserId.eq(user_id))
        .filter(journal_entry_model::Column::EntryDate.eq(date("2025-03-05")))
        .one(app.conn())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.streak, 2);
    assert_eq!(stored.tasks, json!([{ "text": "Write tests", "done": false }]));
}

#[tokio::test]
async fn test_save_entry_twice_updates_same_row() {
    let app = TestApp::new().await;
    let (user_id, token) = test_user();
    let today = Utc::now().date_naive().to_string();

    for gratitude in ["First draft", "Final words"] {
        let res = app
            .router
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/journal/entries",
                Some(&token),
                &json!({ "entry_date": today, "gratitude": gratitude }),
            ))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
    }

    let rows = journal_entry_model::Entity::find()
        .filter(journal_entry_model::Column::UserId.eq(user_id))
        .all(app.conn())
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].gratitude.as_deref(), Some("Final words"));
    assert_eq!(rows[0].day_number, 1);
    assert_eq!(rows[0].streak, 1);
}

#[tokio::test]
async fn test_list_entries_and_first_entry() {
    let app = TestApp::new().await;
    let (user_id, token) = test_user();
    for (raw, text) in [("2025-03-01", "a"), ("2025-03-02", "b")] {
        journal_entry_model::ActiveModel::from(journal_entry(user_id, date(raw), Some(text)))
            .insert(app.conn())
            .await
            .unwrap();
    }

    let res = app
        .router
        .clone()
        .oneshot(empty_request("GET", "/api/journal/list", Some(&token)))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let json = read_json(res).await;
    let entries = json["entries"].as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["entry_date"], "2025-03-02");

    let res = app
        .router
        .clone()
        .oneshot(empty_request("GET", "/api/journal/first-entry", Some(&token)))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let json = read_json(res).await;
    assert_eq!(json["firstEntryDate"], "2025-03-01");
}

#[tokio::test]
async fn test_first_entry_is_null_for_new_user() {
    let app = TestApp::new().await;
    let (_, token) = test_user();

    let res = app
        .router
        .clone()
        .oneshot(empty_request("GET", "/api/journal/first-entry", Some(&token)))
        .await
        .unwrap();

    let json = read_json(res).await;
    assert!(json["firstEntryDate"].is_null());
}
