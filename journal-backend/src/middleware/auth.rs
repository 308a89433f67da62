// src/middleware/auth.rs

use crate::api::AppState;
use crate::error::AppError;
use axum::{
    extract::{FromRequestParts, Request},
    http::{header, request::Parts, HeaderMap, HeaderName, HeaderValue, Method},
    middleware::Next,
    response::Response,
};
use tower_http::cors::CorsLayer;
use tracing::warn;
use uuid::Uuid;

pub const VERCEL_SIGNATURE_HEADER: &str = "x-vercel-signature";
pub const VERCEL_CRON_USER_AGENT: &str = "vercel-cron";

fn unauthorized() -> AppError {
    AppError::Unauthorized("Unauthorized".to_string())
}

/// Authorization: Bearer <token> のトークン部分
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Vercel の cron から呼ばれたリクエストか
pub fn is_vercel_cron(headers: &HeaderMap) -> bool {
    headers.contains_key(VERCEL_SIGNATURE_HEADER)
        || headers
            .get(header::USER_AGENT)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|ua| ua.contains(VERCEL_CRON_USER_AGENT))
}

/// CRON_SECRET が設定されていれば Bearer で一致を求める（未設定なら通す）
fn check_cron_secret(headers: &HeaderMap, secret: Option<&str>) -> Result<(), AppError> {
    match secret {
        None => Ok(()),
        Some(secret) if bearer_token(headers) == Some(secret) => Ok(()),
        Some(_) => Err(unauthorized()),
    }
}

/// Supabase のアクセストークンで認証済みのユーザー
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub email: Option<String>,
}

impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers).ok_or_else(unauthorized)?;

        let claims = state.token_verifier.verify(token).map_err(|e| {
            warn!(path = %parts.uri.path(), error = %e, "Access token rejected");
            unauthorized()
        })?;
        let user_id = claims.user_id().map_err(|_| unauthorized())?;

        Ok(Self {
            user_id,
            email: claims.email,
        })
    }
}

/// cron 用ルート。CRON_SECRET か Vercel cron からの呼び出しを受け付ける
#[derive(Debug, Clone, Copy)]
pub struct CronCaller;

impl FromRequestParts<AppState> for CronCaller {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        if is_vercel_cron(&parts.headers) {
            return Ok(Self);
        }
        check_cron_secret(&parts.headers, state.config.cron_secret.as_deref()).map_err(|e| {
            warn!(path = %parts.uri.path(), "Cron request rejected");
            e
        })?;
        Ok(Self)
    }
}

/// 運用者向けルート。CRON_SECRET のみで認証する（Vercel の例外なし）
#[derive(Debug, Clone, Copy)]
pub struct AdminCaller;

impl FromRequestParts<AppState> for AdminCaller {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        check_cron_secret(&parts.headers, state.config.cron_secret.as_deref()).map_err(|e| {
            warn!(path = %parts.uri.path(), "Admin request rejected");
            e
        })?;
        Ok(Self)
    }
}

/// CORS 設定。解釈できないオリジンは読み飛ばす
pub fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::ACCEPT,
            HeaderName::from_static("stripe-signature"),
        ])
        .max_age(std::time::Duration::from_secs(3600))
}

/// セキュリティヘッダーミドルウェア
pub async fn security_headers_middleware(request: Request, next: Next) -> Response {
    let mut response = next.run(request).await;

    let headers = response.headers_mut();
    headers.insert(
        header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    );
    headers.insert(header::X_FRAME_OPTIONS, HeaderValue::from_static("DENY"));
    headers.insert(
        header::REFERRER_POLICY,
        HeaderValue::from_static("strict-origin-when-cross-origin"),
    );

    response
}
