// src/service/foundation_service.rs

use crate::api::dto::foundation_dto::{CreateFoundationDto, UpdateFoundationDto};
use crate::domain::foundation_model::{self, ActiveModel as FoundationActiveModel};
use crate::domain::progress::today;
use crate::error::{AppError, AppResult};
use crate::repository::foundation_repository::FoundationRepository;
use crate::types::apply_text_patch;
use crate::utils::timeout::{with_timeout, LIST_TIMEOUT};
use crate::utils::validation::{blank_to_none, parse_date};
use sea_orm::{ActiveModelBehavior, Set};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

fn not_found() -> AppError {
    AppError::NotFound("Foundation entry not found".to_string())
}

pub struct FoundationService {
    repo: Arc<FoundationRepository>,
}

impl FoundationService {
    pub fn new(repo: Arc<FoundationRepository>) -> Self {
        Self { repo }
    }

    pub async fn list(&self, user_id: Uuid) -> AppResult<Vec<foundation_model::Model>> {
        with_timeout(LIST_TIMEOUT, "Request timed out", async {
            Ok(self.repo.find_all_for_user(user_id).await?)
        })
        .await
    }

    pub async fn find_by_date(
        &self,
        user_id: Uuid,
        raw_date: Option<&str>,
    ) -> AppResult<Vec<foundation_model::Model>> {
        let date = match raw_date.filter(|d| !d.trim().is_empty()) {
            Some(raw) => Some(parse_date(raw, "entry_date")?),
            None => None,
        };
        Ok(self.repo.find_by_date(user_id, date).await?)
    }

    pub async fn create(
        &self,
        user_id: Uuid,
        payload: CreateFoundationDto,
    ) -> AppResult<foundation_model::Model> {
        let entry_date = match payload.entry_date.as_deref().filter(|d| !d.trim().is_empty()) {
            Some(raw) => parse_date(raw, "entry_date")?,
            None => today(),
        };

        let mut foundation = FoundationActiveModel::new();
        foundation.user_id = Set(user_id);
        foundation.entry_date = Set(entry_date);
        foundation.my_why = Set(blank_to_none(payload.my_why));
        foundation.what_drives_me = Set(blank_to_none(payload.what_drives_me));
        foundation.what_im_done_with = Set(blank_to_none(payload.what_im_done_with));
        foundation.who_im_building_for = Set(blank_to_none(payload.who_im_building_for));
        foundation.my_vision = Set(blank_to_none(payload.my_vision));
        foundation.my_values = Set(blank_to_none(payload.my_values));
        foundation.my_skills = Set(blank_to_none(payload.my_skills));
        foundation.influences = Set(blank_to_none(payload.influences));
        foundation.books_that_shaped_me = Set(blank_to_none(payload.books_that_shaped_me));
        foundation.mentors_role_models = Set(blank_to_none(payload.mentors_role_models));
        foundation.core_principles = Set(blank_to_none(payload.core_principles));
        foundation.lessons_learned = Set(blank_to_none(payload.lessons_learned));
        foundation.accountability_partner = Set(blank_to_none(payload.accountability_partner));

        let created = self.repo.create(foundation).await?;
        info!(user_id = %user_id, foundation_id = %created.id, "Foundation entry created");
        Ok(created)
    }

    pub async fn get(&self, user_id: Uuid, id: Uuid) -> AppResult<foundation_model::Model> {
        self.repo
            .find_by_id_for_user(user_id, id)
            .await?
            .ok_or_else(not_found)
    }

    pub async fn update(
        &self,
        user_id: Uuid,
        id: Uuid,
        payload: UpdateFoundationDto,
    ) -> AppResult<foundation_model::Model> {
        let existing = self.get(user_id, id).await?;
        let mut foundation: FoundationActiveModel = existing.into();

        if let Some(raw) = payload.entry_date.as_deref().filter(|d| !d.trim().is_empty()) {
            foundation.entry_date = Set(parse_date(raw, "entry_date")?);
        }
        apply_text_patch(&mut foundation.my_why, payload.my_why);
        apply_text_patch(&mut foundation.what_drives_me, payload.what_drives_me);
        apply_text_patch(&mut foundation.what_im_done_with, payload.what_im_done_with);
        apply_text_patch(&mut foundation.who_im_building_for, payload.who_im_building_for);
        apply_text_patch(&mut foundation.my_vision, payload.my_vision);
        apply_text_patch(&mut foundation.my_values, payload.my_values);
        apply_text_patch(&mut foundation.my_skills, payload.my_skills);
        apply_text_patch(&mut foundation.influences, payload.influences);
        apply_text_patch(&mut foundation.books_that_shaped_me, payload.books_that_shaped_me);
        apply_text_patch(&mut foundation.mentors_role_models, payload.mentors_role_models);
        apply_text_patch(&mut foundation.core_principles, payload.core_principles);
        apply_text_patch(&mut foundation.lessons_learned, payload.lessons_learned);
        apply_text_patch(&mut foundation.accountability_partner, payload.accountability_partner);

        let updated = self.repo.update(foundation).await?;
        info!(user_id = %user_id, foundation_id = %id, "Foundation entry updated");
        Ok(updated)
    }

    pub async fn delete(&self, user_id: Uuid, id: Uuid) -> AppResult<()> {
        if self.repo.delete_for_user(user_id, id).await? == 0 {
            return Err(not_found());
        }
        info!(user_id = %user_id, foundation_id = %id, "Foundation entry deleted");
        Ok(())
    }
}
