// src/service/checkout_service.rs

use crate::config::StripeConfig;
use crate::domain::order::{OrderDetails, OrderSummary};
use crate::domain::order_confirmation_model::ConfirmationTrigger;
use crate::error::{AppError, AppResult};
use crate::infrastructure::payment_gateway::{CheckoutRequest, CreatedCheckout, PaymentGateway};
use crate::infrastructure::stripe_gateway::order_from_session;
use crate::service::order_confirmation_service::{ConfirmationOutcome, OrderConfirmationService};
use chrono::Utc;
use std::sync::Arc;
use stripe::{CheckoutSession, EventObject, EventType, Webhook};
use tracing::{debug, info, warn};

/// 完了済み注文の一覧（Leverage Journal 以外の商品を除いたもの）
#[derive(Debug, Clone)]
pub struct OrderListing {
    pub orders: Vec<OrderSummary>,
    pub has_more: bool,
}

pub struct CheckoutService {
    gateway: Arc<dyn PaymentGateway>,
    confirmations: Arc<OrderConfirmationService>,
    stripe_config: StripeConfig,
}

impl CheckoutService {
    pub fn new(
        gateway: Arc<dyn PaymentGateway>,
        confirmations: Arc<OrderConfirmationService>,
        stripe_config: StripeConfig,
    ) -> Self {
        Self {
            gateway,
            confirmations,
            stripe_config,
        }
    }

    pub async fn create_checkout(&self, request: CheckoutRequest) -> AppResult<CreatedCheckout> {
        let created = self.gateway.create_checkout_session(request).await?;
        info!(session_id = %created.session_id, "Checkout session created");
        Ok(created)
    }

    /// 決済完了ページからの確認要求
    pub async fn confirm_order(&self, session_id: &str) -> AppResult<ConfirmationOutcome> {
        let order = self.gateway.retrieve_order(session_id).await?;

        if !order.is_paid() {
            return Err(AppError::BadRequest("Payment not completed".to_string()));
        }
        if order.customer_email.is_none() {
            return Err(AppError::BadRequest("No customer email found".to_string()));
        }

        self.confirmations
            .confirm(&order, ConfirmationTrigger::Client, Utc::now())
            .await
    }

    pub async fn list_orders(
        &self,
        limit: u64,
        starting_after: Option<String>,
    ) -> AppResult<OrderListing> {
        let page = self
            .gateway
            .list_completed_orders(limit, starting_after)
            .await?;

        let orders = page
            .orders
            .into_iter()
            .filter(OrderDetails::is_leverage_journal)
            .map(OrderSummary::from)
            .collect();

        Ok(OrderListing {
            orders,
            has_more: page.has_more,
        })
    }

    /// 署名を検証してイベントを処理する
    pub async fn handle_webhook(&self, payload: &str, signature: &str) -> AppResult<()> {
        let event = Webhook::construct_event(payload, signature, &self.stripe_config.webhook_secret)
            .map_err(|e| {
                warn!(error = %e, "Stripe webhook signature verification failed");
                AppError::BadRequest(format!("Webhook Error: {}", e))
            })?;

        match (event.type_, event.data.object) {
            (EventType::CheckoutSessionCompleted, EventObject::CheckoutSession(session)) => {
                self.handle_checkout_completed(session).await
            }
            (event_type, _) => {
                debug!(%event_type, "Ignoring Stripe event");
                Ok(())
            }
        }
    }

    async fn handle_checkout_completed(&self, session: CheckoutSession) -> AppResult<()> {
        let session_id = session.id.to_string();

        // line item 付きで取り直す。取れなければイベント内のセッションで代用
        let order = match self.gateway.retrieve_order(&session_id).await {
            Ok(order) => order,
            Err(e) => {
                warn!(session_id, error = %e, "Failed to retrieve session, using event payload");
                order_from_session(&session)?
            }
        };

        let outcome = self
            .confirmations
            .confirm(&order, ConfirmationTrigger::Webhook, Utc::now())
            .await?;
        info!(session_id, ?outcome, "Processed checkout.session.completed");

        Ok(())
    }
}
