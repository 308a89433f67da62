// src/api/handlers/foundation_handler.rs
use crate::api::dto::common::SuccessResponse;
use crate::api::dto::foundation_dto::{
    CreateFoundationDto, FoundationListResponse, FoundationQuery, FoundationResponse,
    FoundationsResponse, SaveFoundationResponse, UpdateFoundationDto,
};
use crate::api::AppState;
use crate::error::{AppError, AppResult};
use crate::extractors::{JsonBody, ValidatedUuid};
use crate::middleware::auth::AuthenticatedUser;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;

/// 一覧は時間切れでも空配列を付けて返す（画面側は entries を前提にしている）
pub async fn list_foundation_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
) -> Response {
    match app_state.foundation_service.list(user.user_id).await {
        Ok(entries) => Json(FoundationListResponse { entries }).into_response(),
        Err(AppError::GatewayTimeout(message)) => (
            StatusCode::GATEWAY_TIMEOUT,
            Json(json!({ "error": message, "entries": [] })),
        )
            .into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn get_foundations_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Query(query): Query<FoundationQuery>,
) -> AppResult<Json<FoundationsResponse>> {
    let foundations = app_state
        .foundation_service
        .find_by_date(user.user_id, query.entry_date.as_deref())
        .await?;
    Ok(Json(FoundationsResponse { foundations }))
}

pub async fn create_foundation_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    JsonBody(payload): JsonBody<CreateFoundationDto>,
) -> AppResult<Json<SaveFoundationResponse>> {
    let foundation = app_state
        .foundation_service
        .create(user.user_id, payload)
        .await?;
    Ok(Json(SaveFoundationResponse {
        success: true,
        foundation,
    }))
}

pub async fn get_foundation_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    ValidatedUuid(id): ValidatedUuid,
) -> AppResult<Json<FoundationResponse>> {
    let foundation = app_state.foundation_service.get(user.user_id, id).await?;
    Ok(Json(FoundationResponse { foundation }))
}

pub async fn update_foundation_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    ValidatedUuid(id): ValidatedUuid,
    JsonBody(payload): JsonBody<UpdateFoundationDto>,
) -> AppResult<Json<SaveFoundationResponse>> {
    let foundation = app_state
        .foundation_service
        .update(user.user_id, id, payload)
        .await?;
    Ok(Json(SaveFoundationResponse {
        success: true,
        foundation,
    }))
}

pub async fn delete_foundation_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    ValidatedUuid(id): ValidatedUuid,
) -> AppResult<Json<SuccessResponse>> {
    app_state.foundation_service.delete(user.user_id, id).await?;
    Ok(Json(SuccessResponse::ok()))
}

pub fn foundation_router(app_state: AppState) -> Router {
    Router::new()
        .route(
            "/api/foundation",
            get(get_foundations_handler).post(create_foundation_handler),
        )
        .route("/api/foundation/list", get(list_foundation_handler))
        .route(
            "/api/foundation/{id}",
            get(get_foundation_handler)
                .put(update_foundation_handler)
                .delete(delete_foundation_handler),
        )
        .with_state(app_state)
}
