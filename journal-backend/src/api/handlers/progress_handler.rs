// src/api/handlers/progress_handler.rs
use crate::api::AppState;
use crate::domain::progress::ProgressStats;
use crate::error::AppResult;
use crate::middleware::auth::AuthenticatedUser;
use axum::{extract::State, routing::get, Json, Router};

pub async fn progress_stats_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
) -> AppResult<Json<ProgressStats>> {
    let stats = app_state.progress_service.stats(user.user_id).await?;
    Ok(Json(stats))
}

pub fn progress_router(app_state: AppState) -> Router {
    Router::new()
        .route("/api/progress/stats", get(progress_stats_handler))
        .with_state(app_state)
}
