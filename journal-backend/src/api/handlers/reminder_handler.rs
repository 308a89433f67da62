// src/api/handlers/reminder_handler.rs
use crate::api::dto::reminder_dto::{DailyReminderResponse, ReminderResponse};
use crate::api::AppState;
use crate::error::AppResult;
use crate::middleware::auth::{AdminCaller, CronCaller};
use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};

pub async fn daily_reminders_handler(
    State(app_state): State<AppState>,
    _cron: CronCaller,
) -> AppResult<Json<DailyReminderResponse>> {
    let report = app_state.reminder_service.send_daily().await?;
    Ok(Json(DailyReminderResponse {
        success: true,
        journal: report.journal,
        goals: report.goals,
        total: report.total,
    }))
}

/// 日記リマインダーは CRON_SECRET のみ受け付ける
pub async fn journal_reminders_handler(
    State(app_state): State<AppState>,
    _admin: AdminCaller,
) -> AppResult<Json<ReminderResponse>> {
    let report = app_state.reminder_service.send_journal_reminders().await?;
    Ok(Json(ReminderResponse::from_tally(&report.tally, report.total)))
}

pub async fn goal_reminders_handler(
    State(app_state): State<AppState>,
    _cron: CronCaller,
) -> AppResult<Json<ReminderResponse>> {
    let report = app_state.reminder_service.send_goal_reminders().await?;
    Ok(Json(ReminderResponse::from_tally(&report.tally, report.total)))
}

pub async fn weekly_review_reminders_handler(
    State(app_state): State<AppState>,
    _cron: CronCaller,
) -> AppResult<Json<ReminderResponse>> {
    let report = app_state
        .reminder_service
        .send_weekly_review_reminders()
        .await?;
    Ok(Json(ReminderResponse::from_tally(&report.tally, report.total)))
}

pub fn reminder_router(app_state: AppState) -> Router {
    Router::new()
        .route(
            "/api/reminders/daily",
            get(daily_reminders_handler).post(daily_reminders_handler),
        )
        .route("/api/reminders/journal", post(journal_reminders_handler))
        .route("/api/reminders/goals", post(goal_reminders_handler))
        .route(
            "/api/reminders/weekly-review",
            post(weekly_review_reminders_handler),
        )
        .with_state(app_state)
}
