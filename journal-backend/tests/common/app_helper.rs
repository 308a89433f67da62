// tests/common/app_helper.rs

use super::db::TestDatabase;
use super::mock_services::{FakeIdentityProvider, FakePaymentGateway, RecordingMailer};
use axum::Router;
use journal_backend::api::{app_router, AppState, ExternalServices};
use journal_backend::config::{AppConfig, StripeConfig, SupabaseConfig};
use sea_orm::DatabaseConnection;
use std::sync::Arc;

pub const WEBHOOK_SECRET: &str = "whsec_test_journal_secret";
pub const CRON_SECRET: &str = "test-cron-secret";
pub const ADMIN_EMAIL: &str = "admin@leveragejournal.test";

pub fn supabase_config() -> SupabaseConfig {
    SupabaseConfig::for_testing("http://localhost:54321")
}

/// 外部サービスの差し替え
#[derive(Default)]
pub struct TestServices {
    pub payments: FakePaymentGateway,
    pub mailer: RecordingMailer,
    pub identity: FakeIdentityProvider,
}

pub struct TestApp {
    pub router: Router,
    pub db: TestDatabase,
    pub payments: Arc<FakePaymentGateway>,
    pub mailer: Arc<RecordingMailer>,
    pub identity: Arc<FakeIdentityProvider>,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_services(TestServices::default()).await
    }

    pub async fn with_services(services: TestServices) -> Self {
        Self::with_config(AppConfig::for_testing(), services).await
    }

    /// 新しいテストデータベースを作成してアプリを組み立てる
    pub async fn with_config(config: AppConfig, services: TestServices) -> Self {
        super::init_test_env();
        let db = TestDatabase::new().await;

        let payments = Arc::new(services.payments);
        let mailer = Arc::new(services.mailer);
        let identity = Arc::new(services.identity);

        let external = ExternalServices {
            payment_gateway: payments.clone(),
            mailer: mailer.clone(),
            identity: identity.clone(),
        };

        let app_state = AppState::new(
            db.connection.clone(),
            config,
            &supabase_config(),
            StripeConfig::for_testing(WEBHOOK_SECRET),
            external,
        );

        Self {
            router: app_router(app_state),
            db,
            payments,
            mailer,
            identity,
        }
    }

    /// シード・検証用のコネクション
    pub fn conn(&self) -> &DatabaseConnection {
        &self.db.connection
    }
}
