// src/service/notification_service.rs

use crate::domain::email_log_model::{self, EmailType};
use crate::domain::order::OrderDetails;
use crate::repository::email_log_repository::EmailLogRepository;
use crate::utils::email::{mask_email, EmailError, EmailMessage, Mailer};
use crate::utils::email_templates::{EmailTemplate, EmailTemplates, GoalSnapshot};
use sea_orm::{ActiveModelBehavior, Set};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

/// 宛先
#[derive(Debug, Clone, Copy)]
pub struct Recipient<'a> {
    pub email: &'a str,
    pub name: Option<&'a str>,
    pub user_id: Option<Uuid>,
}

impl<'a> Recipient<'a> {
    pub fn email_only(email: &'a str) -> Self {
        Self {
            email,
            name: None,
            user_id: None,
        }
    }
}

/// テンプレートを組み立てて送信し、結果を email_logs に残す
pub struct NotificationService {
    mailer: Arc<dyn Mailer>,
    templates: EmailTemplates,
    email_logs: Arc<EmailLogRepository>,
    admin_email: Option<String>,
}

impl NotificationService {
    pub fn new(
        mailer: Arc<dyn Mailer>,
        email_logs: Arc<EmailLogRepository>,
        app_url: &str,
        admin_email: Option<String>,
    ) -> Self {
        Self {
            mailer,
            templates: EmailTemplates::new(app_url),
            email_logs,
            admin_email,
        }
    }

    pub async fn deliver(
        &self,
        to: Recipient<'_>,
        email_type: EmailType,
        template: EmailTemplate,
    ) -> Result<(), EmailError> {
        let message = EmailMessage {
            to_email: to.email.to_string(),
            to_name: to.name.map(str::to_string),
            subject: template.subject,
            html_body: template.html_body,
            text_body: template.text_body,
        };

        let result = self.mailer.send(&message).await;
        self.record(&to, email_type, &message.subject, result.as_ref().err())
            .await;

        match &result {
            Ok(()) => info!(
                to_email = %mask_email(to.email),
                email_type = %email_type,
                "Email delivered"
            ),
            Err(e) => warn!(
                to_email = %mask_email(to.email),
                email_type = %email_type,
                error = %e,
                "Email delivery failed"
            ),
        }

        result
    }

    /// ログの書き込み失敗は送信結果に影響させない
    async fn record(
        &self,
        to: &Recipient<'_>,
        email_type: EmailType,
        subject: &str,
        error: Option<&EmailError>,
    ) {
        let mut log = email_log_model::ActiveModel::new();
        log.email = Set(to.email.to_string());
        log.user_id = Set(to.user_id);
        log.email_type = Set(email_type.as_str().to_string());
        log.subject = Set(subject.to_string());
        log.status = Set(match error {
            None => email_log_model::STATUS_SENT.to_string(),
            Some(_) => email_log_model::STATUS_FAILED.to_string(),
        });
        log.error_message = Set(error.map(|e| e.to_string()));

        if let Err(e) = self.email_logs.create(log).await {
            warn!(error = %e, email_type = %email_type, "Failed to record email log");
        }
    }

    pub async fn send_verification_code(&self, email: &str, code: &str) -> Result<(), EmailError> {
        let template = self.templates.verification_code(code);
        self.deliver(Recipient::email_only(email), EmailType::Verification, template)
            .await
    }

    /// 購入者への確認メールと管理者への通知を送る。
    /// 成否は購入者宛ての結果で決まり、管理者通知の失敗はログに残すだけ
    pub async fn send_order_emails(&self, order: &OrderDetails) -> Result<(), EmailError> {
        let customer_email = order
            .customer_email
            .as_deref()
            .ok_or_else(|| EmailError::InvalidAddress("missing customer email".to_string()))?;

        let template = self.templates.order_confirmation(order);
        self.deliver(
            Recipient {
                email: customer_email,
                name: order.customer_name.as_deref(),
                user_id: None,
            },
            EmailType::OrderConfirmation,
            template,
        )
        .await?;

        match self.admin_email.as_deref() {
            Some(admin) => {
                let template = self.templates.admin_new_order(order);
                if let Err(e) = self
                    .deliver(
                        Recipient::email_only(admin),
                        EmailType::AdminOrderNotification,
                        template,
                    )
                    .await
                {
                    warn!(session_id = %order.session_id, error = %e, "Admin order notification failed");
                }
            }
            None => warn!(
                session_id = %order.session_id,
                "ADMIN_EMAIL is not set, skipping admin order notification"
            ),
        }

        Ok(())
    }

    pub async fn send_journal_reminder(&self, to: Recipient<'_>) -> Result<(), EmailError> {
        let template = self
            .templates
            .journal_reminder(to.name.unwrap_or(to.email));
        self.deliver(to, EmailType::JournalReminder, template).await
    }

    pub async fn send_goal_reminder(
        &self,
        to: Recipient<'_>,
        goals: &[GoalSnapshot],
    ) -> Result<(), EmailError> {
        let template = self
            .templates
            .goal_progress_reminder(to.name.unwrap_or(to.email), goals);
        self.deliver(to, EmailType::GoalReminder, template).await
    }

    pub async fn send_weekly_review_reminder(
        &self,
        to: Recipient<'_>,
        week_number: i32,
    ) -> Result<(), EmailError> {
        let template = self
            .templates
            .weekly_review_reminder(to.name.unwrap_or(to.email), week_number);
        self.deliver(to, EmailType::WeeklyReviewReminder, template)
            .await
    }

    pub async fn send_test_email(&self, to: Recipient<'_>) -> Result<(), EmailError> {
        let template = self.templates.test_email(to.name.unwrap_or(to.email));
        self.deliver(to, EmailType::Test, template).await
    }
}
