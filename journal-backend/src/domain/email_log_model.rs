// src/domain/email_log_model.rs
use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::Set;
use serde::{Deserialize, Serialize};

pub const STATUS_SENT: &str = "sent";
pub const STATUS_FAILED: &str = "failed";

/// 送信したメールの記録
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "email_logs")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub email: String,
    #[sea_orm(nullable)]
    pub user_id: Option<Uuid>,
    pub email_type: String,
    #[sea_orm(column_type = "Text")]
    pub subject: String,
    pub status: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub error_message: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {
    fn new() -> Self {
        Self {
            id: Set(Uuid::new_v4()),
            created_at: Set(Utc::now()),
            ..ActiveModelTrait::default()
        }
    }
}

/// email_type カラムに入る値
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EmailType {
    Verification,
    OrderConfirmation,
    AdminOrderNotification,
    JournalReminder,
    GoalReminder,
    WeeklyReviewReminder,
    Test,
}

impl EmailType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmailType::Verification => "verification",
            EmailType::OrderConfirmation => "order_confirmation",
            EmailType::AdminOrderNotification => "admin_order_notification",
            EmailType::JournalReminder => "journal_reminder",
            EmailType::GoalReminder => "goal_reminder",
            EmailType::WeeklyReviewReminder => "weekly_review_reminder",
            EmailType::Test => "test",
        }
    }
}

impl std::fmt::Display for EmailType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
