// src/api/handlers/goal_handler.rs
use crate::api::dto::common::SuccessResponse;
use crate::api::dto::goal_dto::{
    CreateGoalDto, GoalQuery, GoalResponse, GoalsResponse, SaveGoalResponse, UpdateGoalDto,
};
use crate::api::AppState;
use crate::error::AppResult;
use crate::extractors::{JsonBody, ValidatedUuid};
use crate::middleware::auth::AuthenticatedUser;
use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};

pub async fn list_goals_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Query(query): Query<GoalQuery>,
) -> AppResult<Json<GoalsResponse>> {
    let goals = app_state
        .goal_service
        .list(user.user_id, query.entry_date.as_deref())
        .await?;
    Ok(Json(GoalsResponse { goals }))
}

pub async fn create_goal_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    JsonBody(payload): JsonBody<CreateGoalDto>,
) -> AppResult<Json<SaveGoalResponse>> {
    let goal = app_state.goal_service.create(user.user_id, payload).await?;
    Ok(Json(SaveGoalResponse {
        success: true,
        goal,
    }))
}

pub async fn get_goal_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    ValidatedUuid(id): ValidatedUuid,
) -> AppResult<Json<GoalResponse>> {
    let goal = app_state.goal_service.get(user.user_id, id).await?;
    Ok(Json(GoalResponse { goal }))
}

pub async fn update_goal_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    ValidatedUuid(id): ValidatedUuid,
    JsonBody(payload): JsonBody<UpdateGoalDto>,
) -> AppResult<Json<SaveGoalResponse>> {
    let goal = app_state
        .goal_service
        .update(user.user_id, id, payload)
        .await?;
    Ok(Json(SaveGoalResponse {
        success: true,
        goal,
    }))
}

pub async fn delete_goal_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    ValidatedUuid(id): ValidatedUuid,
) -> AppResult<Json<SuccessResponse>> {
    app_state.goal_service.delete(user.user_id, id).await?;
    Ok(Json(SuccessResponse::ok()))
}

pub fn goal_router(app_state: AppState) -> Router {
    Router::new()
        .route(
            "/api/goals",
            get(list_goals_handler).post(create_goal_handler),
        )
        .route(
            "/api/goals/{id}",
            get(get_goal_handler)
                .put(update_goal_handler)
                .delete(delete_goal_handler),
        )
        .with_state(app_state)
}
