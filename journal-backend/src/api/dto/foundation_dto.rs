// src/api/dto/foundation_dto.rs
use crate::domain::foundation_model;
use crate::types::{deserialize_patch, Patch};
use serde::{Deserialize, Serialize};

// --- Request DTOs ---

#[derive(Deserialize, Debug, Default)]
pub struct FoundationQuery {
    pub entry_date: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Default, Clone)]
pub struct CreateFoundationDto {
    pub entry_date: Option<String>,
    pub my_why: Option<String>,
    pub what_drives_me: Option<String>,
    pub what_im_done_with: Option<String>,
    pub who_im_building_for: Option<String>,
    pub my_vision: Option<String>,
    pub my_values: Option<String>,
    pub my_skills: Option<String>,
    pub influences: Option<String>,
    pub books_that_shaped_me: Option<String>,
    pub mentors_role_models: Option<String>,
    pub core_principles: Option<String>,
    pub lessons_learned: Option<String>,
    pub accountability_partner: Option<String>,
}

/// 送られてきた項目だけ更新する。null / 空文字は NULL に戻す
#[derive(Deserialize, Debug, Default, Clone)]
pub struct UpdateFoundationDto {
    pub entry_date: Option<String>,
    #[serde(default, deserialize_with = "deserialize_patch")]
    pub my_why: Patch<String>,
    #[serde(default, deserialize_with = "deserialize_patch")]
    pub what_drives_me: Patch<String>,
    #[serde(default, deserialize_with = "deserialize_patch")]
    pub what_im_done_with: Patch<String>,
    #[serde(default, deserialize_with = "deserialize_patch")]
    pub who_im_building_for: Patch<String>,
    #[serde(default, deserialize_with = "deserialize_patch")]
    pub my_vision: Patch<String>,
    #[serde(default, deserialize_with = "deserialize_patch")]
    pub my_values: Patch<String>,
    #[serde(default, deserialize_with = "deserialize_patch")]
    pub my_skills: Patch<String>,
    #[serde(default, deserialize_with = "deserialize_patch")]
    pub influences: Patch<String>,
    #[serde(default, deserialize_with = "deserialize_patch")]
    pub books_that_shaped_me: Patch<String>,
    #[serde(default, deserialize_with = "deserialize_patch")]
    pub mentors_role_models: Patch<String>,
    #[serde(default, deserialize_with = "deserialize_patch")]
    pub core_principles: Patch<String>,
    #[serde(default, deserialize_with = "deserialize_patch")]
    pub lessons_learned: Patch<String>,
    #[serde(default, deserialize_with = "deserialize_patch")]
    pub accountability_partner: Patch<String>,
}

// --- Response DTOs ---

#[derive(Serialize, Debug)]
pub struct FoundationListResponse {
    pub entries: Vec<foundation_model::Model>,
}

#[derive(Serialize, Debug)]
pub struct FoundationsResponse {
    pub foundations: Vec<foundation_model::Model>,
}

#[derive(Serialize, Debug)]
pub struct FoundationResponse {
    pub foundation: foundation_model::Model,
}

#[derive(Serialize, Debug)]
pub struct SaveFoundationResponse {
    pub success: bool,
    pub foundation: foundation_model::Model,
}
