// src/service/journal_service.rs

use crate::api::dto::journal_dto::SaveJournalEntryDto;
use crate::domain::journal_entry_model::{self, ActiveModel as JournalEntryActiveModel};
use crate::domain::progress::{day_number, streak_ending_at};
use crate::error::{AppError, AppResult};
use crate::repository::journal_entry_repository::JournalEntryRepository;
use crate::utils::timeout::{with_timeout, JOURNAL_SAVE_TIMEOUT};
use crate::utils::validation::{blank_to_none, parse_date};
use chrono::NaiveDate;
use sea_orm::{ActiveModelBehavior, Set};
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

pub struct JournalService {
    repo: Arc<JournalEntryRepository>,
}

impl JournalService {
    pub fn new(repo: Arc<JournalEntryRepository>) -> Self {
        Self { repo }
    }

    pub async fn get_entry(
        &self,
        user_id: Uuid,
        raw_date: Option<&str>,
    ) -> AppResult<Option<journal_entry_model::Model>> {
        let raw_date = raw_date
            .filter(|d| !d.trim().is_empty())
            .ok_or_else(|| AppError::BadRequest("Date parameter is required".to_string()))?;
        let date = parse_date(raw_date, "date")?;

        Ok(self.repo.find_by_date(user_id, date).await?)
    }

    /// (user_id, entry_date) で保存し、ストリークを付け直す
    pub async fn save_entry(
        &self,
        user_id: Uuid,
        payload: SaveJournalEntryDto,
    ) -> AppResult<journal_entry_model::Model> {
        let raw_date = payload
            .entry_date
            .as_deref()
            .filter(|d| !d.trim().is_empty())
            .ok_or_else(|| AppError::BadRequest("Entry date is required".to_string()))?;
        let entry_date = parse_date(raw_date, "entry_date")?;

        let saved = with_timeout(JOURNAL_SAVE_TIMEOUT, "Save operation timed out", async move {
            let first_entry_date = self.repo.first_entry_date(user_id).await?;

            let mut entry = JournalEntryActiveModel::new();
            entry.user_id = Set(user_id);
            entry.entry_date = Set(entry_date);
            entry.day_number = Set(day_number(first_entry_date, entry_date));
            entry.gratitude = Set(blank_to_none(payload.gratitude));
            entry.priority_1 = Set(blank_to_none(payload.priority_1));
            entry.priority_2 = Set(blank_to_none(payload.priority_2));
            entry.priority_3 = Set(blank_to_none(payload.priority_3));
            entry.tasks = Set(Value::Array(payload.tasks.unwrap_or_default()));
            entry.reflection = Set(blank_to_none(payload.reflection));
            entry.mood = Set(blank_to_none(payload.mood));
            entry.completed = Set(payload.completed.unwrap_or(false));
            entry.streak = Set(0);

            Ok(self.repo.upsert(entry).await?)
        })
        .await?;

        info!(user_id = %user_id, entry_date = %entry_date, day_number = saved.day_number, "Journal entry saved");

        // ストリークは失敗しても保存結果を返す
        match self.refresh_streak(user_id, saved.clone()).await {
            Ok(updated) => Ok(updated),
            Err(e) => {
                warn!(user_id = %user_id, error = %e, "Streak calculation failed");
                Ok(saved)
            }
        }
    }

    async fn refresh_streak(
        &self,
        user_id: Uuid,
        entry: journal_entry_model::Model,
    ) -> AppResult<journal_entry_model::Model> {
        let content_dates: Vec<NaiveDate> = self
            .repo
            .find_all_for_user(user_id)
            .await?
            .iter()
            .filter(|e| e.has_content())
            .map(|e| e.entry_date)
            .collect();

        let streak = streak_ending_at(&content_dates, entry.entry_date);
        if streak == entry.streak {
            return Ok(entry);
        }
        Ok(self.repo.update_streak(entry, streak).await?)
    }

    pub async fn list_entries(&self, user_id: Uuid) -> AppResult<Vec<journal_entry_model::Model>> {
        Ok(self.repo.find_all_for_user(user_id).await?)
    }

    pub async fn first_entry_date(&self, user_id: Uuid) -> AppResult<Option<NaiveDate>> {
        Ok(self.repo.first_entry_date(user_id).await?)
    }
}
