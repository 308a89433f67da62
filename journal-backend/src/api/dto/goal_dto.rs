// src/api/dto/goal_dto.rs
use crate::domain::goal_model;
use crate::types::{deserialize_patch, Patch};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

// --- Request DTOs ---

#[derive(Deserialize, Debug, Default)]
pub struct GoalQuery {
    pub entry_date: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Default, Clone, Validate)]
pub struct CreateGoalDto {
    pub title: Option<String>,
    pub description: Option<String>,
    pub why: Option<String>,
    pub how: Option<String>,
    #[serde(rename = "type")]
    pub goal_type: Option<String>,
    pub category: Option<String>,
    pub timeline: Option<String>,
    pub reward: Option<String>,
    #[validate(range(min = 0, max = 100, message = "Progress must be between 0 and 100"))]
    pub progress: Option<i32>,
    pub status: Option<String>,
    pub milestones: Option<Value>,
    pub entry_date: Option<String>,
    pub empire_vision: Option<String>,
    pub financial_freedom_number: Option<String>,
    pub legacy_impact: Option<String>,
    pub legacy_goals: Option<String>,
    pub vision_goals: Option<String>,
    pub strategic_goals: Option<String>,
}

#[derive(Deserialize, Debug, Default, Clone, Validate)]
pub struct UpdateGoalDto {
    pub title: Option<String>,
    #[serde(default, deserialize_with = "deserialize_patch")]
    pub description: Patch<String>,
    #[serde(default, deserialize_with = "deserialize_patch")]
    pub why: Patch<String>,
    #[serde(default, deserialize_with = "deserialize_patch")]
    pub how: Patch<String>,
    #[serde(rename = "type")]
    pub goal_type: Option<String>,
    #[serde(default, deserialize_with = "deserialize_patch")]
    pub category: Patch<String>,
    #[serde(default, deserialize_with = "deserialize_patch")]
    pub timeline: Patch<String>,
    #[serde(default, deserialize_with = "deserialize_patch")]
    pub reward: Patch<String>,
    #[validate(range(min = 0, max = 100, message = "Progress must be between 0 and 100"))]
    pub progress: Option<i32>,
    pub status: Option<String>,
    pub milestones: Option<Value>,
    #[serde(default, deserialize_with = "deserialize_patch")]
    pub empire_vision: Patch<String>,
    #[serde(default, deserialize_with = "deserialize_patch")]
    pub financial_freedom_number: Patch<String>,
    #[serde(default, deserialize_with = "deserialize_patch")]
    pub legacy_impact: Patch<String>,
    #[serde(default, deserialize_with = "deserialize_patch")]
    pub legacy_goals: Patch<String>,
    #[serde(default, deserialize_with = "deserialize_patch")]
    pub vision_goals: Patch<String>,
    #[serde(default, deserialize_with = "deserialize_patch")]
    pub strategic_goals: Patch<String>,
}

// --- Response DTOs ---

#[derive(Serialize, Debug)]
pub struct GoalsResponse {
    pub goals: Vec<goal_model::Model>,
}

#[derive(Serialize, Debug)]
pub struct GoalResponse {
    pub goal: goal_model::Model,
}

#[derive(Serialize, Debug)]
pub struct SaveGoalResponse {
    pub success: bool,
    pub goal: goal_model::Model,
}
