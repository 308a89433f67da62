// tests/goal_tests.rs
use axum::http::StatusCode;
use common::app_helper::TestApp;
use common::auth_helper::test_user;
use common::request::{empty_request, json_request, read_json};
use common::test_data::goal;
use chrono::{Duration, Utc};
use journal_backend::domain::goal_model;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait};
use serde_json::json;
use tower::ServiceExt;
use uuid::Uuid;

mod common;

async fn insert_goal(db: &DatabaseConnection, model: goal_model::Model) {
    goal_model::ActiveModel::from(model).insert(db).await.unwrap();
}

#[tokio::test]
async fn test_list_goals() {
    let app = TestApp::new().await;
    let (user_id, token) = test_user();
    let mut older = goal(user_id, "Read 12 books", 100, "completed");
    older.created_at = Utc::now() - Duration::days(3);
    insert_goal(app.conn(), older).await;
    insert_goal(app.conn(), goal(user_id, "Run a marathon", 40, "active")).await;
    insert_goal(app.conn(), goal(Uuid::new_v4(), "Someone else's", 10, "active")).await;

    let res = app
        .router
        .clone()
        .oneshot(empty_request("GET", "/api/goals", Some(&token)))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let json = read_json(res).await;
    let goals = json["goals"].as_array().unwrap();
    assert_eq!(goals.len(), 2);
    assert_eq!(goals[0]["title"], "Run a marathon");
    assert_eq!(goals[0]["type"], "90-day");
    assert_eq!(goals[1]["status"], "completed");
}

#[tokio::test]
async fn test_create_goal_requires_title() {
    let app = TestApp::new().await;
    let (_, token) = test_user();

    let res = app
        .router
        .oneshot(json_request(
            "POST",
            "/api/goals",
            Some(&token),
            &json!({ "title": "   ", "description": "no title" }),
        ))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let json = read_json(res).await;
    assert_eq!(json["error"], "Goal title is required");
}

#[tokio::test]
async fn test_create_goal_rejects_out_of_range_progress() {
    let app = TestApp::new().await;
    let (_, token) = test_user();

    let res = app
        .router
        .oneshot(json_request(
            "POST",
            "/api/goals",
            Some(&token),
            &json!({ "title": "Ship it", "progress": 150 }),
        ))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let json = read_json(res).await;
    assert_eq!(json["error_type"], "validation_errors");
    assert!(json["validation_errors"]["progress"].is_array());
}

#[tokio::test]
async fn test_create_goal() {
    let app = TestApp::new().await;
    let (user_id, token) = test_user();

    let res = app
        .router
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/goals",
            Some(&token),
            &json!({
                "title": "  Run a marathon  ",
                "type": "90-day",
                "milestones": [{ "title": "10k", "done": true }],
            }),
        ))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let json = read_json(res).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["goal"]["title"], "Run a marathon");

    let id: Uuid = json["goal"]["id"].as_str().unwrap().parse().unwrap();
    let stored = goal_model::Entity::find_by_id(id)
        .one(app.conn())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.user_id, user_id);
    assert_eq!(stored.progress, 0);
    assert_eq!(stored.status, "active");
    assert_eq!(stored.milestones, json!([{ "title": "10k", "done": true }]));
}

#[tokio::test]
async fn test_get_goal_not_found() {
    let app = TestApp::new().await;
    let (_, token) = test_user();

    let res = app
        .router
        .clone()
        .oneshot(empty_request(
            "GET",
            &format!("/api/goals/{}", Uuid::new_v4()),
            Some(&token),
        ))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(read_json(res).await["error"], "Goal not found");
}

#[tokio::test]
async fn test_update_goal_progress() {
    let app = TestApp::new().await;
    let (user_id, token) = test_user();
    let existing = goal(user_id, "Run a marathon", 40, "active");
    insert_goal(app.conn(), existing.clone()).await;

    let res = app
        .router
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/api/goals/{}", existing.id),
            Some(&token),
            &json!({ "progress": 100, "status": "completed" }),
        ))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let json = read_json(res).await;
    assert_eq!(json["goal"]["progress"], 100);
    assert_eq!(json["goal"]["status"], "completed");
    assert_eq!(json["goal"]["title"], "Run a marathon");
    assert_eq!(json["goal"]["milestones"], json!([]));
}

#[tokio::test]
async fn test_update_goal_rejects_blank_title() {
    let app = TestApp::new().await;
    let (_, token) = test_user();

    let res = app
        .router
        .oneshot(json_request(
            "PUT",
            &format!("/api/goals/{}", Uuid::new_v4()),
            Some(&token),
            &json!({ "title": "" }),
        ))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_goal() {
    let app = TestApp::new().await;
    let (user_id, token) = test_user();
    let existing = goal(user_id, "Run a marathon", 40, "active");
    insert_goal(app.conn(), existing.clone()).await;

    let res = app
        .router
        .clone()
        .oneshot(empty_request(
            "DELETE",
            &format!("/api/goals/{}", existing.id),
            Some(&token),
        ))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(read_json(res).await["success"], true);
    assert!(goal_model::Entity::find_by_id(existing.id)
        .one(app.conn())
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_delete_other_users_goal_is_not_found() {
    let app = TestApp::new().await;
    let (_, token) = test_user();
    let theirs = goal(Uuid::new_v4(), "Not yours", 0, "active");
    insert_goal(app.conn(), theirs.clone()).await;

    let res = app
        .router
        .clone()
        .oneshot(empty_request(
            "DELETE",
            &format!("/api/goals/{}", theirs.id),
            Some(&token),
        ))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    // 他人の目標は残る
    assert!(goal_model::Entity::find_by_id(theirs.id)
        .one(app.conn())
        .await
        .unwrap()
        .is_some());
}
