// src/api/dto/checkout_dto.rs
use crate::domain::order::OrderSummary;
use serde::{Deserialize, Serialize};
use validator::Validate;

pub const DEFAULT_ORDERS_LIMIT: u64 = 100;
pub const MAX_ORDERS_LIMIT: u64 = 100;

// --- Request DTOs ---

#[derive(Deserialize, Serialize, Debug, Default, Clone, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCheckoutDto {
    pub user_id: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmOrderDto {
    pub session_id: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
pub struct OrdersQuery {
    pub limit: Option<u64>,
    pub starting_after: Option<String>,
}

impl OrdersQuery {
    /// Stripe の上限 100 件に丸める
    pub fn effective_limit(&self) -> u64 {
        self.limit
            .unwrap_or(DEFAULT_ORDERS_LIMIT)
            .clamp(1, MAX_ORDERS_LIMIT)
    }
}

// --- Response DTOs ---

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutSessionResponse {
    pub session_id: String,
    pub url: Option<String>,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmOrderResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub already_sent: Option<bool>,
    pub message: String,
}

impl ConfirmOrderResponse {
    pub fn sent() -> Self {
        Self {
            success: true,
            already_sent: None,
            message: "Order confirmation emails sent".to_string(),
        }
    }

    pub fn already_sent(message: &str) -> Self {
        Self {
            success: true,
            already_sent: Some(true),
            message: message.to_string(),
        }
    }
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct OrdersResponse {
    pub orders: Vec<OrderSummary>,
    pub has_more: bool,
    pub total: usize,
}

#[derive(Serialize, Debug)]
pub struct WebhookResponse {
    pub received: bool,
}
