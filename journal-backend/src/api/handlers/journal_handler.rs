// src/api/handlers/journal_handler.rs
use crate::api::dto::journal_dto::{
    FirstEntryResponse, JournalEntryQuery, JournalEntryResponse, JournalListResponse,
    SaveJournalEntryDto, SaveJournalEntryResponse,
};
use crate::api::AppState;
use crate::error::AppResult;
use crate::extractors::JsonBody;
use crate::middleware::auth::AuthenticatedUser;
use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use tracing::info;

pub async fn get_entry_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Query(query): Query<JournalEntryQuery>,
) -> AppResult<Json<JournalEntryResponse>> {
    let entry = app_state
        .journal_service
        .get_entry(user.user_id, query.date.as_deref())
        .await?;
    Ok(Json(JournalEntryResponse { entry }))
}

pub async fn save_entry_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    JsonBody(payload): JsonBody<SaveJournalEntryDto>,
) -> AppResult<Json<SaveJournalEntryResponse>> {
    info!(user_id = %user.user_id, entry_date = ?payload.entry_date, "Saving journal entry");

    let entry = app_state
        .journal_service
        .save_entry(user.user_id, payload)
        .await?;
    Ok(Json(SaveJournalEntryResponse {
        success: true,
        entry,
    }))
}

pub async fn list_entries_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
) -> AppResult<Json<JournalListResponse>> {
    let entries = app_state.journal_service.list_entries(user.user_id).await?;
    Ok(Json(JournalListResponse { entries }))
}

pub async fn first_entry_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
) -> AppResult<Json<FirstEntryResponse>> {
    let first_entry_date = app_state
        .journal_service
        .first_entry_date(user.user_id)
        .await?;
    Ok(Json(FirstEntryResponse { first_entry_date }))
}

pub fn journal_router(app_state: AppState) -> Router {
    Router::new()
        .route(
            "/api/journal/entries",
            get(get_entry_handler).post(save_entry_handler),
        )
        .route("/api/journal/list", get(list_entries_handler))
        .route("/api/journal/first-entry", get(first_entry_handler))
        .with_state(app_state)
}
