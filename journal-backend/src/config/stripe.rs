use std::env;

#[derive(Clone, Debug, Default)]
pub struct StripeConfig {
    /// 未設定の場合、決済系エンドポイントは設定エラーを返す
    pub secret_key: Option<String>,
    pub webhook_secret: String,
}

impl StripeConfig {
    pub fn from_env() -> Self {
        let secret_key = env::var("STRIPE_SECRET_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty());

        if secret_key.is_none() {
            tracing::warn!("STRIPE_SECRET_KEY not set - checkout and orders will not work");
        }

        let webhook_secret = env::var("STRIPE_WEBHOOK_SECRET").unwrap_or_else(|_| {
            tracing::warn!("STRIPE_WEBHOOK_SECRET not set - webhook verification will fail");
            String::new()
        });

        Self {
            secret_key,
            webhook_secret,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.secret_key.is_some()
    }

    pub fn is_test_mode(&self) -> bool {
        self.secret_key
            .as_deref()
            .is_some_and(|key| key.starts_with("sk_test_"))
    }

    /// テスト用の設定を作成
    pub fn for_testing(webhook_secret: &str) -> Self {
        Self {
            secret_key: Some("sk_test_journal".to_string()),
            webhook_secret: webhook_secret.to_string(),
        }
    }
}
