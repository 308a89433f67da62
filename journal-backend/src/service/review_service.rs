// src/service/review_service.rs

use crate::api::dto::review_dto::SaveReviewDto;
use crate::domain::progress::{review_week_number, today};
use crate::domain::weekly_review_model::{self, ActiveModel as WeeklyReviewActiveModel};
use crate::error::{AppError, AppResult};
use crate::repository::weekly_review_repository::WeeklyReviewRepository;
use crate::utils::timeout::{with_timeout, LIST_TIMEOUT, WRITE_TIMEOUT};
use crate::utils::validation::{parse_date, trimmed};
use chrono::Duration;
use sea_orm::{ActiveModelBehavior, Set};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

pub struct ReviewService {
    repo: Arc<WeeklyReviewRepository>,
}

impl ReviewService {
    pub fn new(repo: Arc<WeeklyReviewRepository>) -> Self {
        Self { repo }
    }

    pub async fn list(
        &self,
        user_id: Uuid,
        raw_week_start: Option<&str>,
    ) -> AppResult<Vec<weekly_review_model::Model>> {
        let week_start = match raw_week_start.filter(|d| !d.trim().is_empty()) {
            Some(raw) => Some(parse_date(raw, "week_start")?),
            None => None,
        };

        with_timeout(LIST_TIMEOUT, "Request timed out", async move {
            Ok(self.repo.find_all_for_user(user_id, week_start).await?)
        })
        .await
    }

    /// (user_id, week_start_date) で保存する。週末日と週番号はサーバー側で決める
    pub async fn save(
        &self,
        user_id: Uuid,
        payload: SaveReviewDto,
    ) -> AppResult<weekly_review_model::Model> {
        let raw_start = payload
            .week_start_date
            .as_deref()
            .filter(|d| !d.trim().is_empty())
            .ok_or_else(|| AppError::BadRequest("Week start date is required".to_string()))?;
        let week_start = parse_date(raw_start, "week_start_date")?;

        let mut review = WeeklyReviewActiveModel::new();
        review.user_id = Set(user_id);
        review.week_start_date = Set(week_start);
        review.week_end_date = Set(week_start + Duration::days(6));
        review.week_number = Set(review_week_number(week_start, today()));
        review.wins = Set(trimmed(payload.wins));
        review.obstacles = Set(trimmed(payload.obstacles));
        review.lessons = Set(trimmed(payload.lessons));
        review.next_steps = Set(trimmed(payload.next_steps));
        review.ai_summary = Set(trimmed(payload.ai_summary));
        review.trends = Set(trimmed(payload.trends));
        review.insights = Set(trimmed(payload.insights));

        let saved = with_timeout(WRITE_TIMEOUT, "Save operation timed out", async move {
            Ok(self.repo.upsert(review).await?)
        })
        .await?;

        info!(
            user_id = %user_id,
            week_start = %saved.week_start_date,
            week_number = saved.week_number,
            "Weekly review saved"
        );
        Ok(saved)
    }
}
