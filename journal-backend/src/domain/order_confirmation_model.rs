// src/domain/order_confirmation_model.rs
use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// 注文確認メール送信の冪等性レコード（Stripe のセッション ID 単位）
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "order_confirmations")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub session_id: String,
    pub status: String,
    pub confirmed_by: String,
    pub attempts: i32,
    #[sea_orm(nullable)]
    pub customer_email: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub last_error: Option<String>,
    pub claimed_at: DateTime<Utc>,
    #[sea_orm(nullable)]
    pub sent_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfirmationStatus {
    Pending,
    Sent,
    Failed,
}

impl ConfirmationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfirmationStatus::Pending => "pending",
            ConfirmationStatus::Sent => "sent",
            ConfirmationStatus::Failed => "failed",
        }
    }
}

/// 送信をトリガーした経路
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfirmationTrigger {
    Webhook,
    Client,
}

impl ConfirmationTrigger {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfirmationTrigger::Webhook => "webhook",
            ConfirmationTrigger::Client => "client",
        }
    }
}

impl Model {
    pub fn is_sent(&self) -> bool {
        self.status == ConfirmationStatus::Sent.as_str()
    }
}
