// src/infrastructure/payment_gateway.rs

use crate::domain::order::OrderDetails;
use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PaymentError {
    /// API キー未設定
    #[error("Stripe is not configured: {0}")]
    NotConfigured(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Stripe API error: {0}")]
    Api(String),
}

/// Checkout 作成時の入力
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckoutRequest {
    pub user_id: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedCheckout {
    pub session_id: String,
    pub url: Option<String>,
}

/// 完了済み注文の1ページ分
#[derive(Debug, Clone, Default)]
pub struct OrderPage {
    pub orders: Vec<OrderDetails>,
    pub has_more: bool,
}

/// 決済プロバイダの操作（本番は Stripe、テストではメモリ上の実装）
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn create_checkout_session(
        &self,
        request: CheckoutRequest,
    ) -> Result<CreatedCheckout, PaymentError>;

    /// セッションと line item を取得して注文情報にする
    async fn retrieve_order(&self, session_id: &str) -> Result<OrderDetails, PaymentError>;

    async fn list_completed_orders(
        &self,
        limit: u64,
        starting_after: Option<String>,
    ) -> Result<OrderPage, PaymentError>;
}
