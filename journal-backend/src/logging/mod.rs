// src/logging/mod.rs

use axum::{
    body::Body,
    http::{HeaderValue, Request},
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

#[macro_export]
macro_rules! log_with_context {
    ($level:expr, $msg:expr $(, $($key:expr => $value:expr),* $(,)?)?) => {
        match $level {
            tracing::Level::ERROR => {
                tracing::error!(
                    message = $msg
                    $(, $($key = ?$value,)*)?
                );
            }
            tracing::Level::WARN => {
                tracing::warn!(
                    message = $msg
                    $(, $($key = ?$value,)*)?
                );
            }
            tracing::Level::INFO => {
                tracing::info!(
                    message = $msg
                    $(, $($key = ?$value,)*)?
                );
            }
            tracing::Level::DEBUG => {
                tracing::debug!(
                    message = $msg
                    $(, $($key = ?$value,)*)?
                );
            }
            _ => {}
        }
    };
}

/// tracing サブスクライバを初期化する（RUST_LOG があればそちらを優先）
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("journal_backend=info,tower_http=info"));

    // テストなどで二重初期化された場合は無視する
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}

// リクエストコンテキスト
#[derive(Clone, Debug)]
pub struct RequestContext {
    pub request_id: String,
    pub path: String,
    pub method: String,
}

impl RequestContext {
    fn from_request(req: &Request<Body>) -> Self {
        // 上流のプロキシが付けた ID があれば引き継ぐ
        let request_id = req
            .headers()
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty() && v.len() <= 128)
            .map(str::to_string)
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        Self {
            request_id,
            path: req.uri().path().to_string(),
            method: req.method().to_string(),
        }
    }
}

// ロギングミドルウェア
pub async fn logging_middleware(mut req: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let context = RequestContext::from_request(&req);
    req.extensions_mut().insert(context.clone());

    log_with_context!(
        tracing::Level::DEBUG,
        "Request started",
        "request_id" => &context.request_id,
        "method" => &context.method,
        "path" => &context.path,
    );

    let mut response = next.run(req).await;
    let duration = start.elapsed();
    let status = response.status().as_u16();

    log_with_context!(
        if status >= 500 { tracing::Level::ERROR }
        else if status >= 400 { tracing::Level::WARN }
        else { tracing::Level::INFO },
        "Request completed",
        "request_id" => &context.request_id,
        "method" => &context.method,
        "path" => &context.path,
        "status" => status,
        "duration_ms" => duration.as_millis(),
    );

    if let Ok(value) = HeaderValue::from_str(&context.request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    response
}
