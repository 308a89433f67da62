// src/api/handlers/email_log_handler.rs
use crate::api::dto::email_log_dto::{EmailLogQuery, EmailLogsResponse, TestEmailResponse};
use crate::api::AppState;
use crate::error::AppResult;
use crate::middleware::auth::AdminCaller;
use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};

pub async fn email_logs_handler(
    State(app_state): State<AppState>,
    _admin: AdminCaller,
    Query(query): Query<EmailLogQuery>,
) -> AppResult<Json<EmailLogsResponse>> {
    let response = app_state.email_log_service.search(query).await?;
    Ok(Json(response))
}

pub async fn test_email_handler(
    State(app_state): State<AppState>,
    _admin: AdminCaller,
) -> AppResult<Json<TestEmailResponse>> {
    let report = app_state.reminder_service.send_test_emails().await?;

    let message = if report.total == 0 {
        "No registered users found".to_string()
    } else {
        format!(
            "Test emails sent to {} out of {} users",
            report.sent, report.total
        )
    };
    let failed = report.failed_emails.len();

    Ok(Json(TestEmailResponse {
        success: true,
        message,
        sent: report.sent,
        failed,
        total: report.total,
        failed_emails: (failed > 0).then_some(report.failed_emails),
    }))
}

pub fn email_log_router(app_state: AppState) -> Router {
    Router::new()
        .route("/api/email-logs", get(email_logs_handler))
        .route("/api/test-email", post(test_email_handler))
        .with_state(app_state)
}
