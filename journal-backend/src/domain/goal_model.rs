// src/domain/goal_model.rs
use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ConnectionTrait, DbErr, Set};
use serde::{Deserialize, Serialize};

pub const DEFAULT_GOAL_TYPE: &str = "short";
pub const STATUS_ACTIVE: &str = "active";
pub const STATUS_COMPLETED: &str = "completed";

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "goals")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    #[sea_orm(column_type = "Text")]
    pub title: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub why: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub how: Option<String>,
    #[sea_orm(column_name = "type")]
    #[serde(rename = "type")]
    pub goal_type: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub category: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub timeline: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub reward: Option<String>,
    pub progress: i32,
    pub status: String,
    #[sea_orm(column_type = "JsonBinary")]
    pub milestones: Json,
    pub entry_date: NaiveDate,
    #[sea_orm(column_type = "Text", nullable)]
    pub empire_vision: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub financial_freedom_number: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub legacy_impact: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub legacy_goals: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub vision_goals: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub strategic_goals: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    fn new() -> Self {
        Self {
            id: Set(Uuid::new_v4()),
            goal_type: Set(DEFAULT_GOAL_TYPE.to_string()),
            status: Set(STATUS_ACTIVE.to_string()),
            progress: Set(0),
            milestones: Set(Json::Array(Vec::new())),
            created_at: Set(Utc::now()),
            updated_at: Set(Utc::now()),
            ..ActiveModelTrait::default()
        }
    }

    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        if !insert {
            self.updated_at = Set(Utc::now());
        }
        Ok(self)
    }
}

impl Model {
    pub fn is_completed(&self) -> bool {
        self.status == STATUS_COMPLETED
    }
}
