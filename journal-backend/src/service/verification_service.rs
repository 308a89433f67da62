// src/service/verification_service.rs
//
// メールに送った6桁コードでサインアップ／サインインする

use crate::domain::verification_code_model::ActiveModel as VerificationCodeActiveModel;
use crate::error::{AppError, AppResult};
use crate::infrastructure::identity::{AuthSession, IdentityProvider, NewUser, UserUpdate};
use crate::repository::verification_code_repository::VerificationCodeRepository;
use crate::service::notification_service::NotificationService;
use crate::utils::email::{is_valid_email, mask_email};
use crate::utils::validation::trimmed;
use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use sea_orm::{ActiveModelBehavior, Set};
use std::sync::Arc;
use tracing::{error, info, warn};

pub const CODE_TTL_MINUTES: i64 = 10;

pub fn generate_code() -> String {
    rand::thread_rng().gen_range(100_000..=999_999).to_string()
}

fn normalize_email(raw: Option<String>) -> Option<String> {
    trimmed(raw).map(|email| email.to_lowercase())
}

pub struct VerificationService {
    repo: Arc<VerificationCodeRepository>,
    identity: Arc<dyn IdentityProvider>,
    notifications: Arc<NotificationService>,
}

impl VerificationService {
    pub fn new(
        repo: Arc<VerificationCodeRepository>,
        identity: Arc<dyn IdentityProvider>,
        notifications: Arc<NotificationService>,
    ) -> Self {
        Self {
            repo,
            identity,
            notifications,
        }
    }

    /// コードを発行してメールで送る。発行したコードを返す
    pub async fn send_code(
        &self,
        email: Option<String>,
        password: Option<String>,
        name: Option<String>,
        now: DateTime<Utc>,
    ) -> AppResult<String> {
        let email = normalize_email(email)
            .ok_or_else(|| AppError::BadRequest("Email is required".to_string()))?;
        if !is_valid_email(&email) {
            return Err(AppError::BadRequest("Invalid email format".to_string()));
        }
        let password = password.filter(|p| !p.is_empty());

        // パスワード付き＝サインアップ。既存ユーザーとの重複を弾く
        if password.is_some() {
            match self.identity.find_user_by_email(&email).await {
                Ok(Some(_)) => {
                    return Err(AppError::BadRequest("Email already exists".to_string()));
                }
                Ok(None) => {}
                Err(e) => warn!(error = %e, "Could not check for existing user"),
            }
        }

        let code = generate_code();
        let mut record = VerificationCodeActiveModel::new();
        record.email = Set(email.clone());
        record.code = Set(code.clone());
        record.expires_at = Set(now + Duration::minutes(CODE_TTL_MINUTES));
        record.pending_password = Set(password);
        record.name = Set(trimmed(name));
        self.repo.create(record).await?;

        self.notifications
            .send_verification_code(&email, &code)
            .await
            .map_err(|e| {
                error!(email = %mask_email(&email), error = %e, "Failed to send verification code");
                AppError::ConfigurationError(
                    "Failed to send email. Please check SMTP configuration.".to_string(),
                )
            })?;

        info!(email = %mask_email(&email), "Verification code sent");
        Ok(code)
    }

    /// コードを検証し、ユーザーを作成（または更新）してセッションを返す
    pub async fn verify_code(
        &self,
        email: Option<String>,
        code: Option<String>,
        now: DateTime<Utc>,
    ) -> AppResult<AuthSession> {
        let (Some(email), Some(code)) = (normalize_email(email), trimmed(code)) else {
            return Err(AppError::BadRequest(
                "Email and code are required".to_string(),
            ));
        };

        let record = self.repo.find_valid(&email, &code, now).await?.ok_or_else(|| {
            AppError::BadRequest("Invalid or expired code. Please request a new code.".to_string())
        })?;

        let Some(password) = record.pending_password.clone() else {
            return Err(AppError::BadRequest(
                "Password not found. Please sign up again.".to_string(),
            ));
        };
        let name = record.name.clone();
        self.repo.consume(record).await?;

        match self.identity.find_user_by_email(&email).await? {
            Some(user) => {
                self.identity
                    .update_user(
                        &user,
                        UserUpdate {
                            password: Some(password.clone()),
                            email_confirm: true,
                            name,
                        },
                    )
                    .await?;
                info!(user_id = %user.id, "Existing user confirmed by code");
            }
            None => {
                let created = self
                    .identity
                    .create_user(NewUser {
                        email: email.clone(),
                        password: password.clone(),
                        name,
                    })
                    .await?;
                info!(user_id = %created.id, "User created by code");
            }
        }

        match self.identity.sign_in_with_password(&email, &password).await {
            Ok(session) => Ok(session),
            Err(password_error) => {
                warn!(
                    email = %mask_email(&email),
                    error = %password_error,
                    "Password sign-in failed, trying magic link"
                );
                self.identity
                    .sign_in_with_magic_link(&email)
                    .await
                    .map_err(|link_error| {
                        AppError::ExternalServiceError(format!(
                            "Failed to sign in. Password sign-in failed: {}. Magic link also failed: {}",
                            password_error, link_error
                        ))
                    })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_code_is_six_digits() {
        for _ in 0..100 {
            let code = generate_code();
            assert_eq!(code.len(), 6);
            assert!(code.chars().all(|c| c.is_ascii_digit()));
            assert_ne!(code.chars().next(), Some('0'));
        }
    }

    #[test]
    fn test_normalize_email() {
        assert_eq!(
            normalize_email(Some("  Ada@Example.COM ".into())).as_deref(),
            Some("ada@example.com")
        );
        assert_eq!(normalize_email(Some("   ".into())), None);
    }
}
