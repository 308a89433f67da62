// src/utils/jwt.rs

use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Supabase が発行するアクセストークンの audience
pub const SUPABASE_AUDIENCE: &str = "authenticated";

/// JWT関連のエラー
#[derive(Error, Debug)]
pub enum JwtError {
    #[error("Failed to decode JWT: {0}")]
    DecodingError(String),

    #[error("JWT token has expired")]
    TokenExpired,

    #[error("Invalid JWT token")]
    InvalidToken,
}

/// Supabase アクセストークンの Claims（使う項目のみ）
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SupabaseClaims {
    /// Subject (user ID)
    pub sub: String,
    pub exp: i64,
    #[serde(default)]
    pub iat: Option<i64>,
    #[serde(default)]
    pub aud: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

impl SupabaseClaims {
    pub fn user_id(&self) -> Result<Uuid, JwtError> {
        Uuid::parse_str(&self.sub).map_err(|_| JwtError::InvalidToken)
    }
}

/// プロジェクトの JWT シークレット (HS256) でアクセストークンをローカル検証する
#[derive(Clone)]
pub struct SupabaseTokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl SupabaseTokenVerifier {
    pub fn new(jwt_secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[SUPABASE_AUDIENCE]);
        validation.leeway = 30;

        Self {
            decoding_key: DecodingKey::from_secret(jwt_secret.as_bytes()),
            validation,
        }
    }

    pub fn verify(&self, token: &str) -> Result<SupabaseClaims, JwtError> {
        let token_data = decode::<SupabaseClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::TokenExpired,
                _ => JwtError::DecodingError(e.to_string()),
            })?;

        // anon キーなどサービス用トークンはユーザーとして扱わない
        if token_data.claims.role.as_deref() == Some("anon") {
            return Err(JwtError::InvalidToken);
        }

        Ok(token_data.claims)
    }
}
