// tests/verification_tests.rs
use axum::http::StatusCode;
use chrono::{Duration, Utc};
use common::app_helper::{TestApp, TestServices};
use common::mock_services::{FakeIdentityProvider, RecordingMailer};
use common::request::{json_request, read_json};
use common::test_data::{auth_user, verification_code};
use journal_backend::config::AppConfig;
use journal_backend::domain::{email_log_model, verification_code_model};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait};
use serde_json::json;
use tower::ServiceExt;
use uuid::Uuid;

mod common;

const EMAIL: &str = "ada@example.com";

fn send_code(body: serde_json::Value) -> axum::http::Request<axum::body::Body> {
    json_request("POST", "/api/auth/send-code", None, &body)
}

fn verify_code(body: serde_json::Value) -> axum::http::Request<axum::body::Body> {
    json_request("POST", "/api/auth/verify-code", None, &body)
}

async fn insert_code(
    db: &DatabaseConnection,
    model: verification_code_model::Model,
) -> verification_code_model::Model {
    verification_code_model::ActiveModel::from(model)
        .insert(db)
        .await
        .unwrap()
}

async fn stored_codes(db: &DatabaseConnection) -> Vec<verification_code_model::Model> {
    verification_code_model::Entity::find().all(db).await.unwrap()
}

#[tokio::test]
async fn test_send_code_requires_email() {
    let app = TestApp::new().await;

    let res = app
        .router
        .oneshot(send_code(json!({ "email": "   " })))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(read_json(res).await["error"], "Email is required");
}

#[tokio::test]
async fn test_send_code_rejects_invalid_email() {
    let app = TestApp::new().await;

    let res = app
        .router
        .oneshot(send_code(json!({ "email": "not-an-email" })))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(read_json(res).await["error"], "Invalid email format");
}

#[tokio::test]
async fn test_send_code_rejects_existing_user_on_signup() {
    let app = TestApp::with_services(TestServices {
        identity: FakeIdentityProvider::with_users(vec![auth_user(Uuid::new_v4(), EMAIL, None)]),
        ..Default::default()
    })
    .await;

    let res = app
        .router
        .clone()
        .oneshot(send_code(json!({ "email": "ADA@example.com", "password": "hunter22" })))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(read_json(res).await["error"], "Email already exists");
    assert!(app.mailer.sent().is_empty());
    assert!(stored_codes(app.conn()).await.is_empty());
}

#[tokio::test]
async fn test_send_code_hides_code_outside_development() {
    let app = TestApp::new().await;

    let res = app
        .router
        .clone()
        .oneshot(send_code(json!({ "email": " Ada@Example.com ", "password": "hunter22", "name": "Ada" })))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let json = read_json(res).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["message"], "Verification code sent to your email");
    assert!(json.get("code").is_none());

    // アドレスは小文字に揃えて送る
    assert_eq!(app.mailer.sent_to(EMAIL).len(), 1);

    let codes = stored_codes(app.conn()).await;
    assert_eq!(codes.len(), 1);
    assert_eq!(codes[0].email, EMAIL);
    assert_eq!(codes[0].code.len(), 6);
    assert!(!codes[0].used);
    assert_eq!(codes[0].pending_password.as_deref(), Some("hunter22"));
    assert_eq!(codes[0].name.as_deref(), Some("Ada"));
    let ttl = codes[0].expires_at - codes[0].created_at;
    assert!(ttl > Duration::minutes(9) && ttl <= Duration::minutes(10));

    let logs = email_log_model::Entity::find().all(app.conn()).await.unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].email, EMAIL);
    assert_eq!(logs[0].status, "sent");
}

#[tokio::test]
async fn test_send_code_returns_code_in_development() {
    let config = AppConfig {
        environment: "development".to_string(),
        ..AppConfig::for_testing()
    };
    let app = TestApp::with_config(config, TestServices::default()).await;

    let res = app
        .router
        .clone()
        .oneshot(send_code(json!({ "email": EMAIL, "password": "hunter22" })))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let json = read_json(res).await;
    let code = json["code"].as_str().unwrap().to_string();
    assert_eq!(code.len(), 6);

    let sent = app.mailer.sent_to(EMAIL);
    assert_eq!(sent.len(), 1);
    assert!(sent[0].text_body.contains(&code));
    assert_eq!(stored_codes(app.conn()).await[0].code, code);
}

#[tokio::test]
async fn test_send_code_reports_smtp_failure() {
    let app = TestApp::with_services(TestServices {
        mailer: RecordingMailer::failing_for(&[EMAIL]),
        ..Default::default()
    })
    .await;

    let res = app
        .router
        .clone()
        .oneshot(send_code(json!({ "email": EMAIL, "password": "hunter22" })))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = read_json(res).await;
    assert_eq!(
        json["message"],
        "Failed to send email. Please check SMTP configuration."
    );
    assert_eq!(json["error_type"], "configuration_error");

    let logs = email_log_model::Entity::find().all(app.conn()).await.unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].status, "failed");
    assert!(logs[0].error_message.is_some());
}

#[tokio::test]
async fn test_verify_code_requires_email_and_code() {
    let app = TestApp::new().await;

    let res = app
        .router
        .oneshot(verify_code(json!({ "email": EMAIL })))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(read_json(res).await["error"], "Email and code are required");
}

#[tokio::test]
async fn test_verify_code_rejects_unknown_code() {
    let app = TestApp::new().await;
    insert_code(app.conn(), verification_code(EMAIL, "123456", Some("hunter22"))).await;

    let res = app
        .router
        .clone()
        .oneshot(verify_code(json!({ "email": EMAIL, "code": "000000" })))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        read_json(res).await["error"],
        "Invalid or expired code. Please request a new code."
    );
}

#[tokio::test]
async fn test_verify_code_rejects_expired_code() {
    let app = TestApp::new().await;
    let mut expired = verification_code(EMAIL, "123456", Some("hunter22"));
    expired.created_at = Utc::now() - Duration::minutes(15);
    expired.expires_at = Utc::now() - Duration::minutes(5);
    insert_code(app.conn(), expired).await;

    let res = app
        .router
        .clone()
        .oneshot(verify_code(json!({ "email": EMAIL, "code": "123456" })))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert!(app.identity.created.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_verify_code_without_pending_password() {
    let app = TestApp::new().await;
    insert_code(app.conn(), verification_code(EMAIL, "123456", None)).await;

    let res = app
        .router
        .clone()
        .oneshot(verify_code(json!({ "email": EMAIL, "code": "123456" })))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        read_json(res).await["error"],
        "Password not found. Please sign up again."
    );
}

#[tokio::test]
async fn test_verify_code_creates_user_and_signs_in() {
    let app = TestApp::new().await;
    let record = insert_code(app.conn(), verification_code(EMAIL, "123456", Some("hunter22"))).await;

    let res = app
        .router
        .clone()
        .oneshot(verify_code(json!({ "email": EMAIL, "code": " 123456 " })))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let json = read_json(res).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["session"]["access_token"], format!("access-token-for-{}", EMAIL));
    assert_eq!(json["user"]["email"], EMAIL);

    {
        let created = app.identity.created.lock().unwrap();
        assert_eq!(created.len(), 1);
        assert_eq!(created[0].email, EMAIL);
        assert_eq!(created[0].password, "hunter22");
        assert_eq!(created[0].name.as_deref(), Some("Ada"));
    }

    // 使用済みになり、平文パスワードは消える
    let consumed = verification_code_model::Entity::find_by_id(record.id)
        .one(app.conn())
        .await
        .unwrap()
        .unwrap();
    assert!(consumed.used);
    assert!(consumed.pending_password.is_none());

    // 同じコードは二度使えない
    let res = app
        .router
        .clone()
        .oneshot(verify_code(json!({ "email": EMAIL, "code": "123456" })))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_verify_code_updates_existing_user() {
    let user_id = Uuid::new_v4();
    let app = TestApp::with_services(TestServices {
        identity: FakeIdentityProvider::with_users(vec![auth_user(user_id, EMAIL, None)]),
        ..Default::default()
    })
    .await;
    insert_code(app.conn(), verification_code(EMAIL, "123456", Some("new-password"))).await;

    let res = app
        .router
        .clone()
        .oneshot(verify_code(json!({ "email": EMAIL, "code": "123456" })))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(read_json(res).await["user"]["id"], user_id.to_string());

    assert!(app.identity.created.lock().unwrap().is_empty());
    let updated = app.identity.updated.lock().unwrap();
    assert_eq!(updated.len(), 1);
    assert_eq!(updated[0].0, user_id.to_string());
    assert_eq!(updated[0].1.password.as_deref(), Some("new-password"));
    assert!(updated[0].1.email_confirm);
}

#[tokio::test]
async fn test_verify_code_falls_back_to_magic_link() {
    let app = TestApp::with_services(TestServices {
        identity: FakeIdentityProvider {
            password_sign_in_fails: true,
            ..Default::default()
        },
        ..Default::default()
    })
    .await;
    insert_code(app.conn(), verification_code(EMAIL, "123456", Some("hunter22"))).await;

    let res = app
        .router
        .clone()
        .oneshot(verify_code(json!({ "email": EMAIL, "code": "123456" })))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        read_json(res).await["session"]["access_token"],
        format!("access-token-for-{}", EMAIL)
    );
}

#[tokio::test]
async fn test_verify_code_fails_when_both_sign_ins_fail() {
    let app = TestApp::with_services(TestServices {
        identity: FakeIdentityProvider {
            password_sign_in_fails: true,
            magic_link_fails: true,
            ..Default::default()
        },
        ..Default::default()
    })
    .await;
    insert_code(app.conn(), verification_code(EMAIL, "123456", Some("hunter22"))).await;

    let res = app
        .router
        .clone()
        .oneshot(verify_code(json!({ "email": EMAIL, "code": "123456" })))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
    let json = read_json(res).await;
    assert_eq!(json["error_type"], "external_service_error");
    assert!(json["message"]
        .as_str()
        .unwrap()
        .contains("Magic link also failed"));
}
