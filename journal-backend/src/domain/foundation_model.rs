// src/domain/foundation_model.rs
use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ConnectionTrait, DbErr, Set};
use serde::{Deserialize, Serialize};

/// 90日プログラムの土台（自分の「なぜ」や価値観）。同じ日に複数件登録できる
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "foundation")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub entry_date: NaiveDate,
    #[sea_orm(column_type = "Text", nullable)]
    pub my_why: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub what_drives_me: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub what_im_done_with: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub who_im_building_for: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub my_vision: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub my_values: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub my_skills: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub influences: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub books_that_shaped_me: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub mentors_role_models: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub core_principles: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub lessons_learned: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub accountability_partner: Option<String>,
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
