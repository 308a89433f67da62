// src/api/handlers/checkout_handler.rs
use crate::api::dto::checkout_dto::{
    CheckoutSessionResponse, ConfirmOrderDto, ConfirmOrderResponse, CreateCheckoutDto,
    OrdersQuery, OrdersResponse, WebhookResponse,
};
use crate::api::AppState;
use crate::error::{AppError, AppResult};
use crate::extractors::JsonBody;
use crate::infrastructure::payment_gateway::CheckoutRequest;
use crate::log_with_context;
use crate::middleware::auth::AdminCaller;
use crate::service::order_confirmation_service::ConfirmationOutcome;
use crate::utils::validation::trimmed;
use axum::{
    extract::{Query, State},
    http::HeaderMap,
    routing::{get, post},
    Json, Router,
};
use tracing::info;
use validator::Validate;

pub const STRIPE_SIGNATURE_HEADER: &str = "stripe-signature";

pub async fn create_checkout_handler(
    State(app_state): State<AppState>,
    JsonBody(payload): JsonBody<CreateCheckoutDto>,
) -> AppResult<Json<CheckoutSessionResponse>> {
    payload.validate()?;

    let created = app_state
        .checkout_service
        .create_checkout(CheckoutRequest {
            user_id: trimmed(payload.user_id),
            email: trimmed(payload.email),
        })
        .await?;

    Ok(Json(CheckoutSessionResponse {
        session_id: created.session_id,
        url: created.url,
    }))
}

pub async fn confirm_order_handler(
    State(app_state): State<AppState>,
    JsonBody(payload): JsonBody<ConfirmOrderDto>,
) -> AppResult<Json<ConfirmOrderResponse>> {
    let session_id = trimmed(payload.session_id)
        .ok_or_else(|| AppError::BadRequest("Session ID is required".to_string()))?;

    let outcome = app_state.checkout_service.confirm_order(&session_id).await?;
    info!(session_id = %session_id, ?outcome, "Order confirmation requested by client");

    match outcome {
        ConfirmationOutcome::Sent => Ok(Json(ConfirmOrderResponse::sent())),
        ConfirmationOutcome::AlreadySent => Ok(Json(ConfirmOrderResponse::already_sent(
            "Order confirmation emails already sent",
        ))),
        ConfirmationOutcome::InProgress => Ok(Json(ConfirmOrderResponse::already_sent(
            "Order confirmation emails are being sent",
        ))),
        ConfirmationOutcome::FallbackExpired => Err(AppError::Conflict(
            "Order confirmation is handled by the payment webhook for this session".to_string(),
        )),
        ConfirmationOutcome::NoCustomerEmail => Err(AppError::BadRequest(
            "No customer email found".to_string(),
        )),
    }
}

pub async fn list_orders_handler(
    State(app_state): State<AppState>,
    _admin: AdminCaller,
    Query(query): Query<OrdersQuery>,
) -> AppResult<Json<OrdersResponse>> {
    let limit = query.effective_limit();
    let listing = app_state
        .checkout_service
        .list_orders(limit, trimmed(query.starting_after))
        .await?;

    let total = listing.orders.len();
    Ok(Json(OrdersResponse {
        orders: listing.orders,
        has_more: listing.has_more,
        total,
    }))
}

/// 署名検証のため本文は生のまま受け取る
pub async fn stripe_webhook_handler(
    State(app_state): State<AppState>,
    headers: HeaderMap,
    body: String,
) -> AppResult<Json<WebhookResponse>> {
    let signature = headers
        .get(STRIPE_SIGNATURE_HEADER)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| AppError::BadRequest("No signature".to_string()))?;

    log_with_context!(
        tracing::Level::DEBUG,
        "Stripe webhook received",
        "payload_bytes" => body.len(),
    );

    app_state
        .checkout_service
        .handle_webhook(&body, signature)
        .await?;

    Ok(Json(WebhookResponse { received: true }))
}

pub fn checkout_router(app_state: AppState) -> Router {
    Router::new()
        .route("/api/checkout", post(create_checkout_handler))
        .route("/api/checkout/confirm-order", post(confirm_order_handler))
        .route("/api/orders", get(list_orders_handler))
        .route("/api/webhooks/stripe", post(stripe_webhook_handler))
        .with_state(app_state)
}
