// src/domain/journal_entry_model.rs
use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ConnectionTrait, DbErr, Set};
use serde::{Deserialize, Serialize};

/// 1日分のジャーナル（ユーザーごとに日付で一意）
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "journal_entries")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub entry_date: NaiveDate,
    pub day_number: i32,
    #[sea_orm(column_type = "Text", nullable)]
    pub gratitude: Option<String>,
    #[sea_orm(column_name = "priority_1", column_type = "Text", nullable)]
    pub priority_1: Option<String>,
    #[sea_orm(column_name = "priority_2", column_type = "Text", nullable)]
    pub priority_2: Option<String>,
    #[sea_orm(column_name = "priority_3", column_type = "Text", nullable)]
    pub priority_3: Option<String>,
    #[sea_orm(column_type = "JsonBinary")]
    pub tasks: Json,
    #[sea_orm(column_type = "Text", nullable)]
    pub reflection: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub mood: Option<String>,
    pub completed: bool,
    pub streak: i32,
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

/// tasks 配列の要素
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct JournalTask {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub completed: bool,
}

fn is_filled(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.trim().is_empty())
}

impl Model {
    /// 何かしら書き込まれている日かどうか（ストリークや進捗の集計対象）
    pub fn has_content(&self) -> bool {
        is_filled(&self.gratitude)
            || is_filled(&self.priority_1)
            || is_filled(&self.priority_2)
            || is_filled(&self.priority_3)
            || is_filled(&self.reflection)
            || is_filled(&self.mood)
            || self.task_list().iter().any(|t| !t.text.trim().is_empty())
    }

    /// tasks カラムを型付きで取り出す。壊れた要素は読み飛ばす
    pub fn task_list(&self) -> Vec<JournalTask> {
        match &self.tasks {
            Json::Array(items) => items
                .iter()
                .filter_map(|item| serde_json::from_value(item.clone()).ok())
                .collect(),
            _ => Vec::new(),
        }
    }
}
