// src/service/goal_service.rs

use crate::api::dto::goal_dto::{CreateGoalDto, UpdateGoalDto};
use crate::domain::goal_model::{self, ActiveModel as GoalActiveModel};
use crate::domain::progress::today;
use crate::error::{AppError, AppResult};
use crate::repository::goal_repository::GoalRepository;
use crate::types::{apply_text_patch, Patch};
use crate::utils::timeout::{with_timeout, WRITE_TIMEOUT};
use crate::utils::validation::{parse_date, trimmed};
use sea_orm::{ActiveModelBehavior, Set};
use serde_json::Value;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

fn not_found() -> AppError {
    AppError::NotFound("Goal not found".to_string())
}

fn required_title(title: Option<String>) -> AppResult<String> {
    trimmed(title).ok_or_else(|| AppError::BadRequest("Goal title is required".to_string()))
}

/// 目標の文章項目は前後の空白を落としてから保存する
fn trim_patch(value: Patch<String>) -> Patch<String> {
    value.map(trimmed)
}

pub struct GoalService {
    repo: Arc<GoalRepository>,
}

impl GoalService {
    pub fn new(repo: Arc<GoalRepository>) -> Self {
        Self { repo }
    }

    pub async fn list(
        &self,
        user_id: Uuid,
        raw_date: Option<&str>,
    ) -> AppResult<Vec<goal_model::Model>> {
        let date = match raw_date.filter(|d| !d.trim().is_empty()) {
            Some(raw) => Some(parse_date(raw, "entry_date")?),
            None => None,
        };
        Ok(self.repo.find_all_for_user(user_id, date).await?)
    }

    pub async fn create(
        &self,
        user_id: Uuid,
        payload: CreateGoalDto,
    ) -> AppResult<goal_model::Model> {
        payload.validate()?;
        let title = required_title(payload.title)?;
        let entry_date = match payload.entry_date.as_deref().filter(|d| !d.trim().is_empty()) {
            Some(raw) => parse_date(raw, "entry_date")?,
            None => today(),
        };

        let mut goal = GoalActiveModel::new();
        goal.user_id = Set(user_id);
        goal.title = Set(title);
        goal.description = Set(trimmed(payload.description));
        goal.why = Set(trimmed(payload.why));
        goal.how = Set(trimmed(payload.how));
        if let Some(goal_type) = payload.goal_type.filter(|t| !t.trim().is_empty()) {
            goal.goal_type = Set(goal_type);
        }
        goal.category = Set(trimmed(payload.category));
        goal.timeline = Set(trimmed(payload.timeline));
        goal.reward = Set(trimmed(payload.reward));
        if let Some(progress) = payload.progress {
            goal.progress = Set(progress);
        }
        if let Some(status) = payload.status.filter(|s| !s.trim().is_empty()) {
            goal.status = Set(status);
        }
        if let Some(milestones) = payload.milestones.filter(|m| !m.is_null()) {
            goal.milestones = Set(milestones);
        }
        goal.entry_date = Set(entry_date);
        goal.empire_vision = Set(trimmed(payload.empire_vision));
        goal.financial_freedom_number = Set(trimmed(payload.financial_freedom_number));
        goal.legacy_impact = Set(trimmed(payload.legacy_impact));
        goal.legacy_goals = Set(trimmed(payload.legacy_goals));
        goal.vision_goals = Set(trimmed(payload.vision_goals));
        goal.strategic_goals = Set(trimmed(payload.strategic_goals));

        let created = with_timeout(WRITE_TIMEOUT, "Save operation timed out", async move {
            Ok(self.repo.create(goal).await?)
        })
        .await?;

        info!(user_id = %user_id, goal_id = %created.id, "Goal created");
        Ok(created)
    }

    pub async fn get(&self, user_id: Uuid, id: Uuid) -> AppResult<goal_model::Model> {
        self.repo
            .find_by_id_for_user(user_id, id)
            .await?
            .ok_or_else(not_found)
    }

    pub async fn update(
        &self,
        user_id: Uuid,
        id: Uuid,
        payload: UpdateGoalDto,
    ) -> AppResult<goal_model::Model> {
        payload.validate()?;
        let title = match payload.title {
            Some(title) => Some(required_title(Some(title))?),
            None => None,
        };

        let updated = with_timeout(WRITE_TIMEOUT, "Update operation timed out", async move {
            let existing = self.get(user_id, id).await?;
            let mut goal: GoalActiveModel = existing.into();

            if let Some(title) = title {
                goal.title = Set(title);
            }
            apply_text_patch(&mut goal.description, trim_patch(payload.description));
            apply_text_patch(&mut goal.why, trim_patch(payload.why));
            apply_text_patch(&mut goal.how, trim_patch(payload.how));
            if let Some(goal_type) = payload.goal_type {
                goal.goal_type = Set(goal_type);
            }
            apply_text_patch(&mut goal.category, trim_patch(payload.category));
            apply_text_patch(&mut goal.timeline, payload.timeline);
            apply_text_patch(&mut goal.reward, trim_patch(payload.reward));
            if let Some(progress) = payload.progress {
                goal.progress = Set(progress);
            }
            if let Some(status) = payload.status {
                goal.status = Set(status);
            }
            if let Some(milestones) = payload.milestones {
                goal.milestones = Set(match milestones {
                    Value::Null => Value::Array(Vec::new()),
                    other => other,
                });
            }
            apply_text_patch(&mut goal.empire_vision, trim_patch(payload.empire_vision));
            apply_text_patch(
                &mut goal.financial_freedom_number,
                trim_patch(payload.financial_freedom_number),
            );
            apply_text_patch(&mut goal.legacy_impact, trim_patch(payload.legacy_impact));
            apply_text_patch(&mut goal.legacy_goals, trim_patch(payload.legacy_goals));
            apply_text_patch(&mut goal.vision_goals, trim_patch(payload.vision_goals));
            apply_text_patch(&mut goal.strategic_goals, trim_patch(payload.strategic_goals));

            Ok(self.repo.update(goal).await?)
        })
        .await?;

        info!(user_id = %user_id, goal_id = %id, "Goal updated");
        Ok(updated)
    }

    pub async fn delete(&self, user_id: Uuid, id: Uuid) -> AppResult<()> {
        let deleted = with_timeout(WRITE_TIMEOUT, "Delete operation timed out", async {
            Ok(self.repo.delete_for_user(user_id, id).await?)
        })
        .await?;

        if deleted == 0 {
            return Err(not_found());
        }
        info!(user_id = %user_id, goal_id = %id, "Goal deleted");
        Ok(())
    }
}
