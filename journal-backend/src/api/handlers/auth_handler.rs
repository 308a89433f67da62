// src/api/handlers/auth_handler.rs
use crate::api::dto::auth_dto::{SendCodeDto, SendCodeResponse, VerifyCodeDto, VerifyCodeResponse};
use crate::api::AppState;
use crate::error::AppResult;
use crate::extractors::JsonBody;
use axum::{extract::State, routing::post, Json, Router};
use chrono::Utc;

pub async fn send_code_handler(
    State(app_state): State<AppState>,
    JsonBody(payload): JsonBody<SendCodeDto>,
) -> AppResult<Json<SendCodeResponse>> {
    let code = app_state
        .verification_service
        .send_code(payload.email, payload.password, payload.name, Utc::now())
        .await?;

    Ok(Json(SendCodeResponse {
        success: true,
        message: "Verification code sent to your email".to_string(),
        // 開発環境ではメールを見ずに試せるよう返す
        code: app_state.config.is_development().then_some(code),
    }))
}

pub async fn verify_code_handler(
    State(app_state): State<AppState>,
    JsonBody(payload): JsonBody<VerifyCodeDto>,
) -> AppResult<Json<VerifyCodeResponse>> {
    let session = app_state
        .verification_service
        .verify_code(payload.email, payload.code, Utc::now())
        .await?;

    Ok(Json(VerifyCodeResponse::from(session)))
}

pub fn auth_router(app_state: AppState) -> Router {
    Router::new()
        .route("/api/auth/send-code", post(send_code_handler))
        .route("/api/auth/verify-code", post(verify_code_handler))
        .with_state(app_state)
}
