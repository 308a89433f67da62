// src/api/handlers/review_handler.rs
use crate::api::dto::review_dto::{ReviewQuery, ReviewsResponse, SaveReviewDto, SaveReviewResponse};
use crate::api::AppState;
use crate::error::AppResult;
use crate::extractors::JsonBody;
use crate::middleware::auth::AuthenticatedUser;
use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};

pub async fn list_reviews_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Query(query): Query<ReviewQuery>,
) -> AppResult<Json<ReviewsResponse>> {
    let reviews = app_state
        .review_service
        .list(user.user_id, query.week_start.as_deref())
        .await?;
    Ok(Json(ReviewsResponse { reviews }))
}

pub async fn save_review_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    JsonBody(payload): JsonBody<SaveReviewDto>,
) -> AppResult<Json<SaveReviewResponse>> {
    let review = app_state.review_service.save(user.user_id, payload).await?;
    Ok(Json(SaveReviewResponse {
        success: true,
        review,
    }))
}

pub fn review_router(app_state: AppState) -> Router {
    Router::new()
        .route(
            "/api/reviews",
            get(list_reviews_handler).post(save_review_handler),
        )
        .with_state(app_state)
}
