// src/service/order_confirmation_service.rs
//
// 注文確認メールを Stripe セッションごとに一度だけ送る。
// Webhook が正で、クライアントからの確認要求はセッション作成から一定時間内の代替経路

use crate::config::OrderConfirmationConfig;
use crate::domain::order::OrderDetails;
use crate::domain::order_confirmation_model::{ConfirmationStatus, ConfirmationTrigger};
use crate::error::{AppError, AppResult};
use crate::repository::order_confirmation_repository::OrderConfirmationRepository;
use crate::service::notification_service::NotificationService;
use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;
use tracing::{error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmationOutcome {
    /// この呼び出しで送信した
    Sent,
    AlreadySent,
    /// 別の経路が送信中
    InProgress,
    /// クライアント経路の受付期間を過ぎている
    FallbackExpired,
    NoCustomerEmail,
}

pub struct OrderConfirmationService {
    repo: Arc<OrderConfirmationRepository>,
    notifications: Arc<NotificationService>,
    config: OrderConfirmationConfig,
}

impl OrderConfirmationService {
    pub fn new(
        repo: Arc<OrderConfirmationRepository>,
        notifications: Arc<NotificationService>,
        config: OrderConfirmationConfig,
    ) -> Self {
        Self {
            repo,
            notifications,
            config,
        }
    }

    fn fallback_expired(&self, order: &OrderDetails, now: DateTime<Utc>) -> bool {
        now - order.created > Duration::seconds(self.config.fallback_window_secs)
    }

    pub async fn confirm(
        &self,
        order: &OrderDetails,
        trigger: ConfirmationTrigger,
        now: DateTime<Utc>,
    ) -> AppResult<ConfirmationOutcome> {
        let Some(customer_email) = order.customer_email.as_deref() else {
            warn!(session_id = %order.session_id, "No customer email on session");
            return Ok(ConfirmationOutcome::NoCustomerEmail);
        };
        let session_id = order.session_id.as_str();

        if trigger == ConfirmationTrigger::Client && self.fallback_expired(order, now) {
            let outcome = match self.repo.find(session_id).await? {
                Some(record) if record.is_sent() => ConfirmationOutcome::AlreadySent,
                Some(record) if record.status == ConfirmationStatus::Pending.as_str() => {
                    ConfirmationOutcome::InProgress
                }
                _ => ConfirmationOutcome::FallbackExpired,
            };
            info!(session_id, ?outcome, "Client confirmation outside fallback window");
            return Ok(outcome);
        }

        let claimed = if self
            .repo
            .try_insert_claim(session_id, trigger, customer_email, now)
            .await?
        {
            true
        } else {
            match self.repo.find(session_id).await? {
                Some(record) if record.is_sent() => {
                    info!(session_id, trigger = trigger.as_str(), "Order confirmation already sent");
                    return Ok(ConfirmationOutcome::AlreadySent);
                }
                Some(_) => {
                    let stale_before = now - Duration::seconds(self.config.stale_claim_secs);
                    self.repo
                        .try_reclaim(session_id, trigger, now, stale_before)
                        .await?
                }
                None => false,
            }
        };

        if !claimed {
            info!(session_id, trigger = trigger.as_str(), "Order confirmation owned by another trigger");
            return Ok(ConfirmationOutcome::InProgress);
        }

        self.dispatch(order, trigger, now).await
    }

    async fn dispatch(
        &self,
        order: &OrderDetails,
        trigger: ConfirmationTrigger,
        now: DateTime<Utc>,
    ) -> AppResult<ConfirmationOutcome> {
        let session_id = order.session_id.as_str();

        match self.notifications.send_order_emails(order).await {
            Ok(()) => {
                // 送信済みの記録に失敗しても結果は Sent。記録は stale 扱いで再送の可能性が残る
                if let Err(e) = self.repo.mark_sent(session_id, Utc::now()).await {
                    error!(session_id, error = %e, "Failed to mark order confirmation as sent");
                }
                info!(session_id, trigger = trigger.as_str(), "Order confirmation emails sent");
                Ok(ConfirmationOutcome::Sent)
            }
            Err(send_error) => {
                if let Err(e) = self
                    .repo
                    .mark_failed(session_id, &send_error.to_string(), now)
                    .await
                {
                    error!(session_id, error = %e, "Failed to mark order confirmation as failed");
                }
                Err(AppError::InternalServerError(format!(
                    "Failed to send order confirmation for {}: {}",
                    session_id, send_error
                )))
            }
        }
    }
}
