// src/api/mod.rs
use crate::config::{AppConfig, StripeConfig, SupabaseConfig};
use crate::db::DbPool;
use crate::infrastructure::identity::IdentityProvider;
use crate::infrastructure::payment_gateway::PaymentGateway;
use crate::logging::logging_middleware;
use crate::middleware::auth::{cors_layer, security_headers_middleware};
use crate::repository::{
    email_log_repository::EmailLogRepository, foundation_repository::FoundationRepository,
    goal_repository::GoalRepository, journal_entry_repository::JournalEntryRepository,
    order_confirmation_repository::OrderConfirmationRepository,
    verification_code_repository::VerificationCodeRepository,
    weekly_review_repository::WeeklyReviewRepository,
};
use crate::service::{
    checkout_service::CheckoutService, email_log_service::EmailLogService,
    foundation_service::FoundationService, goal_service::GoalService,
    journal_service::JournalService, notification_service::NotificationService,
    order_confirmation_service::OrderConfirmationService, progress_service::ProgressService,
    reminder_service::ReminderService, review_service::ReviewService,
    verification_service::VerificationService,
};
use crate::utils::email::Mailer;
use crate::utils::jwt::SupabaseTokenVerifier;
use axum::{middleware, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub mod dto;
pub mod handlers;

/// 外部サービスとの接点（本番とテストで差し替える）
#[derive(Clone)]
pub struct ExternalServices {
    pub payment_gateway: Arc<dyn PaymentGateway>,
    pub mailer: Arc<dyn Mailer>,
    pub identity: Arc<dyn IdentityProvider>,
}

/// 統一されたアプリケーション状態
#[derive(Clone)]
pub struct AppState {
    pub journal_service: Arc<JournalService>,
    pub foundation_service: Arc<FoundationService>,
    pub goal_service: Arc<GoalService>,
    pub review_service: Arc<ReviewService>,
    pub progress_service: Arc<ProgressService>,
    pub checkout_service: Arc<CheckoutService>,
    pub reminder_service: Arc<ReminderService>,
    pub verification_service: Arc<VerificationService>,
    pub email_log_service: Arc<EmailLogService>,
    pub token_verifier: Arc<SupabaseTokenVerifier>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(
        db_pool: DbPool,
        config: AppConfig,
        supabase_config: &SupabaseConfig,
        stripe_config: StripeConfig,
        external: ExternalServices,
    ) -> Self {
        let journal_repo = Arc::new(JournalEntryRepository::new(db_pool.clone()));
        let goal_repo = Arc::new(GoalRepository::new(db_pool.clone()));
        let review_repo = Arc::new(WeeklyReviewRepository::new(db_pool.clone()));
        let email_log_repo = Arc::new(EmailLogRepository::new(db_pool.clone()));

        let notifications = Arc::new(NotificationService::new(
            external.mailer,
            email_log_repo.clone(),
            &config.app_url,
            config.admin_email.clone(),
        ));
        let confirmations = Arc::new(OrderConfirmationService::new(
            Arc::new(OrderConfirmationRepository::new(db_pool.clone())),
            notifications.clone(),
            config.order_confirmation.clone(),
        ));

        Self {
            journal_service: Arc::new(JournalService::new(journal_repo.clone())),
            foundation_service: Arc::new(FoundationService::new(Arc::new(
                FoundationRepository::new(db_pool.clone()),
            ))),
            goal_service: Arc::new(GoalService::new(goal_repo.clone())),
            review_service: Arc::new(ReviewService::new(review_repo.clone())),
            progress_service: Arc::new(ProgressService::new(
                journal_repo.clone(),
                goal_repo.clone(),
            )),
            checkout_service: Arc::new(CheckoutService::new(
                external.payment_gateway,
                confirmations,
                stripe_config,
            )),
            reminder_service: Arc::new(ReminderService::new(
                external.identity.clone(),
                journal_repo,
                goal_repo,
                review_repo,
                notifications.clone(),
            )),
            verification_service: Arc::new(VerificationService::new(
                Arc::new(VerificationCodeRepository::new(db_pool)),
                external.identity,
                notifications,
            )),
            email_log_service: Arc::new(EmailLogService::new(email_log_repo)),
            token_verifier: Arc::new(SupabaseTokenVerifier::new(&supabase_config.jwt_secret)),
            config: Arc::new(config),
        }
    }
}

/// 全ルートをまとめたルーター
pub fn app_router(app_state: AppState) -> Router {
    use handlers::{
        auth_handler::auth_router, checkout_handler::checkout_router,
        email_log_handler::email_log_router, foundation_handler::foundation_router,
        goal_handler::goal_router, journal_handler::journal_router,
        progress_handler::progress_router, reminder_handler::reminder_router,
        review_handler::review_router, system_handler::system_router,
    };

    let cors = cors_layer(&app_state.config.cors_allowed_origins);

    Router::new()
        .merge(auth_router(app_state.clone()))
        .merge(checkout_router(app_state.clone()))
        .merge(journal_router(app_state.clone()))
        .merge(foundation_router(app_state.clone()))
        .merge(goal_router(app_state.clone()))
        .merge(review_router(app_state.clone()))
        .merge(progress_router(app_state.clone()))
        .merge(reminder_router(app_state.clone()))
        .merge(email_log_router(app_state.clone()))
        .merge(system_router(app_state))
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(middleware::from_fn(logging_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
