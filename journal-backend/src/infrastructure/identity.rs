// src/infrastructure/identity.rs

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::utils::email::display_name;

#[derive(Error, Debug)]
pub enum IdentityError {
    #[error("Invalid login credentials")]
    InvalidCredentials,

    #[error("Auth API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Auth request failed: {0}")]
    Transport(String),

    #[error("Unexpected auth response: {0}")]
    UnexpectedResponse(String),
}

/// Supabase Auth のユーザー（使う項目のみ）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub user_metadata: Value,
}

impl AuthUser {
    fn metadata_str(&self, key: &str) -> Option<&str> {
        self.user_metadata.get(key).and_then(Value::as_str)
    }

    /// メールアドレスが空でなければ返す
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref().filter(|e| !e.trim().is_empty())
    }

    pub fn display_name(&self) -> Option<String> {
        self.email().map(|email| {
            display_name(
                self.metadata_str("full_name"),
                self.metadata_str("name"),
                email,
            )
        })
    }

    pub fn has_email(&self, email: &str) -> bool {
        self.email()
            .is_some_and(|own| own.eq_ignore_ascii_case(email.trim()))
    }
}

/// サインイン結果のセッション
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthSession {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub expires_in: Option<i64>,
    #[serde(default)]
    pub expires_at: Option<i64>,
    #[serde(default)]
    pub token_type: Option<String>,
    pub user: AuthUser,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub email: String,
    pub password: String,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserUpdate {
    pub password: Option<String>,
    pub email_confirm: bool,
    pub name: Option<String>,
}

/// 認証基盤（本番は Supabase Auth の管理 API）
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// 登録済みユーザーを全件取得する
    async fn list_users(&self) -> Result<Vec<AuthUser>, IdentityError>;

    /// メール確認済みのユーザーを作る
    async fn create_user(&self, user: NewUser) -> Result<AuthUser, IdentityError>;

    async fn update_user(
        &self,
        user: &AuthUser,
        update: UserUpdate,
    ) -> Result<AuthUser, IdentityError>;

    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, IdentityError>;

    /// マジックリンクを発行して即座に検証し、セッションを得る
    async fn sign_in_with_magic_link(&self, email: &str) -> Result<AuthSession, IdentityError>;

    async fn find_user_by_email(&self, email: &str) -> Result<Option<AuthUser>, IdentityError> {
        Ok(self
            .list_users()
            .await?
            .into_iter()
            .find(|user| user.has_email(email)))
    }
}
