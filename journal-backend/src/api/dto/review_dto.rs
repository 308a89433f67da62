// src/api/dto/review_dto.rs
use crate::domain::weekly_review_model;
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Debug, Default)]
pub struct ReviewQuery {
    pub week_start: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Default, Clone)]
pub struct SaveReviewDto {
    pub week_start_date: Option<String>,
    pub wins: Option<String>,
    pub obstacles: Option<String>,
    pub lessons: Option<String>,
    pub next_steps: Option<String>,
    pub ai_summary: Option<String>,
    pub trends: Option<String>,
    pub insights: Option<String>,
}

#[derive(Serialize, Debug)]
pub struct ReviewsResponse {
    pub reviews: Vec<weekly_review_model::Model>,
}

#[derive(Serialize, Debug)]
pub struct SaveReviewResponse {
    pub success: bool,
    pub review: weekly_review_model::Model,
}
