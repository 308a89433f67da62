// src/main.rs
use journal_backend::api::{app_router, AppState, ExternalServices};
use journal_backend::config::{AppConfig, StripeConfig, SupabaseConfig};
use journal_backend::db::create_db_pool;
use journal_backend::infrastructure::stripe_gateway::StripeGateway;
use journal_backend::infrastructure::supabase_auth::SupabaseAuthClient;
use journal_backend::logging::init_tracing;
use journal_backend::utils::email::EmailService;
use migration::{Migrator, MigratorTrait};
use std::env;
use std::sync::Arc;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    init_tracing();

    tracing::info!("Starting Leverage Journal backend...");

    // 設定を読み込む
    let app_config = AppConfig::from_env()?;
    let supabase_config = SupabaseConfig::from_env()?;
    let stripe_config = StripeConfig::from_env();
    tracing::info!(
        environment = %app_config.environment,
        stripe_configured = stripe_config.is_configured(),
        "Configuration loaded"
    );

    let db_pool = create_db_pool(&app_config).await?;
    tracing::info!("Database pool created successfully.");

    if env::var("RUN_MIGRATIONS").is_ok_and(|v| v == "true" || v == "1") {
        Migrator::up(&db_pool, None).await?;
        tracing::info!("Migrations applied.");
    }

    let external = ExternalServices {
        payment_gateway: Arc::new(StripeGateway::new(&stripe_config, &app_config.app_url)),
        mailer: Arc::new(EmailService::from_env()?),
        identity: Arc::new(SupabaseAuthClient::new(&supabase_config)?),
    };

    let addr = format!("{}:{}", app_config.host, app_config.port);
    let app_state = AppState::new(
        db_pool,
        app_config,
        &supabase_config,
        stripe_config,
        external,
    );
    let app = app_router(app_state);

    tracing::info!("Router configured. Server listening on {}", addr);

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}
