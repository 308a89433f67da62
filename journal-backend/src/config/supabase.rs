use std::env;

/// Supabase プロジェクトへの接続設定
#[derive(Clone, Debug)]
pub struct SupabaseConfig {
    /// 例: https://xyzcompany.supabase.co
    pub url: String,
    pub anon_key: String,
    pub service_role_key: String,
    /// アクセストークン (HS256) の検証に使う JWT シークレット
    pub jwt_secret: String,
}

impl SupabaseConfig {
    pub fn from_env() -> Result<Self, String> {
        let url = env::var("SUPABASE_URL")
            .or_else(|_| env::var("NEXT_PUBLIC_SUPABASE_URL"))
            .map_err(|_| "SUPABASE_URL must be set")?;
        let anon_key = env::var("SUPABASE_ANON_KEY")
            .or_else(|_| env::var("NEXT_PUBLIC_SUPABASE_ANON_KEY"))
            .map_err(|_| "SUPABASE_ANON_KEY must be set")?;
        let service_role_key = env::var("SUPABASE_SERVICE_ROLE_KEY").unwrap_or_else(|_| {
            tracing::warn!("SUPABASE_SERVICE_ROLE_KEY not set - falling back to anon key");
            anon_key.clone()
        });
        let jwt_secret =
            env::var("SUPABASE_JWT_SECRET").map_err(|_| "SUPABASE_JWT_SECRET must be set")?;

        Ok(Self {
            url: url.trim_end_matches('/').to_string(),
            anon_key,
            service_role_key,
            jwt_secret,
        })
    }

    /// GoTrue (Supabase Auth) のベース URL
    pub fn auth_url(&self) -> String {
        format!("{}/auth/v1", self.url)
    }

    /// テスト用の設定を作成
    pub fn for_testing(url: &str) -> Self {
        Self {
            url: url.trim_end_matches('/').to_string(),
            anon_key: "test-anon-key".to_string(),
            service_role_key: "test-service-role-key".to_string(),
            jwt_secret: "test-supabase-jwt-secret-that-is-long-enough".to_string(),
        }
    }
}
