// src/service/progress_service.rs

use crate::domain::progress::{today, ProgressStats};
use crate::error::AppResult;
use crate::repository::goal_repository::GoalRepository;
use crate::repository::journal_entry_repository::JournalEntryRepository;
use std::sync::Arc;
use uuid::Uuid;

pub struct ProgressService {
    journal_repo: Arc<JournalEntryRepository>,
    goal_repo: Arc<GoalRepository>,
}

impl ProgressService {
    pub fn new(journal_repo: Arc<JournalEntryRepository>, goal_repo: Arc<GoalRepository>) -> Self {
        Self {
            journal_repo,
            goal_repo,
        }
    }

    pub async fn stats(&self, user_id: Uuid) -> AppResult<ProgressStats> {
        let entries = self.journal_repo.find_all_for_user(user_id).await?;
        let goals = self.goal_repo.find_all_for_user(user_id, None).await?;
        Ok(ProgressStats::compute(&entries, &goals, today()))
    }
}
