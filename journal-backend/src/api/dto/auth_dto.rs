// src/api/dto/auth_dto.rs
use crate::infrastructure::identity::{AuthSession, AuthUser};
use serde::{Deserialize, Serialize};
use serde_json::Value;

// --- Request DTOs ---

#[derive(Deserialize, Debug, Default, Clone)]
pub struct SendCodeDto {
    pub email: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
}

#[derive(Deserialize, Debug, Default, Clone)]
pub struct VerifyCodeDto {
    pub email: Option<String>,
    pub code: Option<String>,
}

// --- Response DTOs ---

#[derive(Serialize, Debug)]
pub struct SendCodeResponse {
    pub success: bool,
    pub message: String,
    /// 開発環境でのみ返す
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

#[derive(Serialize, Debug)]
pub struct SessionDto {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_in: Option<i64>,
    pub expires_at: Option<i64>,
    pub token_type: Option<String>,
}

#[derive(Serialize, Debug)]
pub struct SessionUserDto {
    pub id: String,
    pub email: Option<String>,
    pub user_metadata: Value,
}

impl From<AuthUser> for SessionUserDto {
    fn from(user: AuthUser) -> Self {
        Self {
            id: user.id,
            email: user.email,
            user_metadata: user.user_metadata,
        }
    }
}

#[derive(Serialize, Debug)]
pub struct VerifyCodeResponse {
    pub success: bool,
    pub message: String,
    pub session: SessionDto,
    pub user: SessionUserDto,
}

impl From<AuthSession> for VerifyCodeResponse {
    fn from(session: AuthSession) -> Self {
        Self {
            success: true,
            message: "Code verified! Account created and signed in successfully.".to_string(),
            session: SessionDto {
                access_token: session.access_token,
                refresh_token: session.refresh_token,
                expires_in: session.expires_in,
                expires_at: session.expires_at,
                token_type: session.token_type,
            },
            user: session.user.into(),
        }
    }
}
