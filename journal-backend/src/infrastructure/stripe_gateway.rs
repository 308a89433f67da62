// src/infrastructure/stripe_gateway.rs

use crate::config::StripeConfig;
use crate::domain::order::{
    OrderDetails, PRODUCT_DESCRIPTION, PRODUCT_IMAGE_URL, PRODUCT_METADATA_KEY,
    PRODUCT_NAME, UNIT_AMOUNT_PENCE,
};
use crate::infrastructure::payment_gateway::{
    CheckoutRequest, CreatedCheckout, OrderPage, PaymentError, PaymentGateway,
};
use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use stripe::{
    CheckoutSession, CheckoutSessionId, CheckoutSessionMode, CheckoutSessionStatus, Client,
    CreateCheckoutSession, CreateCheckoutSessionLineItems,
    CreateCheckoutSessionLineItemsPriceData, CreateCheckoutSessionLineItemsPriceDataProductData,
    CreateCheckoutSessionPaymentMethodTypes, Currency, ListCheckoutSessions,
};

/// Stripe API 上限
const MAX_PAGE_SIZE: u64 = 100;

const EXPAND_LINE_ITEMS: &[&str] = &["line_items"];
const EXPAND_LIST_LINE_ITEMS: &[&str] = &["data.line_items"];

pub struct StripeGateway {
    client: Option<Client>,
    app_url: String,
}

fn to_json<T: Serialize>(value: &T) -> Result<Value, PaymentError> {
    serde_json::to_value(value).map_err(|e| PaymentError::Api(format!("Unexpected Stripe payload: {}", e)))
}

/// Checkout Session（line_items を展開済みならそれも含む）から注文情報を作る
pub fn order_from_session(session: &CheckoutSession) -> Result<OrderDetails, PaymentError> {
    let json = to_json(session)?;
    let line_items = json
        .pointer("/line_items/data")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();
    Ok(OrderDetails::from_stripe_json(&json, &line_items))
}

fn parse_session_id(session_id: &str) -> Result<CheckoutSessionId, PaymentError> {
    session_id
        .parse::<CheckoutSessionId>()
        .map_err(|_| PaymentError::InvalidRequest(format!("Invalid session id: {}", session_id)))
}

impl StripeGateway {
    pub fn new(config: &StripeConfig, app_url: &str) -> Self {
        Self {
            client: config.secret_key.as_deref().map(Client::new),
            app_url: app_url.trim_end_matches('/').to_string(),
        }
    }

    fn client(&self) -> Result<&Client, PaymentError> {
        self.client.as_ref().ok_or_else(|| {
            PaymentError::NotConfigured(
                "Stripe secret key is not configured. Please add STRIPE_SECRET_KEY to your environment variables."
                    .to_string(),
            )
        })
    }
}

#[async_trait]
impl PaymentGateway for StripeGateway {
    async fn create_checkout_session(
        &self,
        request: CheckoutRequest,
    ) -> Result<CreatedCheckout, PaymentError> {
        let client = self.client()?;

        let success_url = format!(
            "{}/checkout/success?session_id={{CHECKOUT_SESSION_ID}}",
            self.app_url
        );
        let cancel_url = format!("{}/checkout/cancel", self.app_url);

        let params = CreateCheckoutSession {
            success_url: Some(&success_url),
            cancel_url: Some(&cancel_url),
            customer_email: request.email.as_deref().filter(|e| !e.is_empty()),
            payment_method_types: Some(vec![CreateCheckoutSessionPaymentMethodTypes::Card]),
            mode: Some(CheckoutSessionMode::Payment),
            line_items: Some(vec![CreateCheckoutSessionLineItems {
                price_data: Some(CreateCheckoutSessionLineItemsPriceData {
                    currency: Currency::GBP,
                    product_data: Some(CreateCheckoutSessionLineItemsPriceDataProductData {
                        name: PRODUCT_NAME.to_string(),
                        description: Some(PRODUCT_DESCRIPTION.to_string()),
                        images: Some(vec![PRODUCT_IMAGE_URL.to_string()]),
                        ..Default::default()
                    }),
                    unit_amount: Some(UNIT_AMOUNT_PENCE),
                    ..Default::default()
                }),
                quantity: Some(1),
                ..Default::default()
            }]),
            metadata: Some(
                [
                    ("userId".to_string(), request.user_id.unwrap_or_default()),
                    ("product".to_string(), PRODUCT_METADATA_KEY.to_string()),
                    ("price".to_string(), "19.99".to_string()),
                ]
                .into_iter()
                .collect(),
            ),
            ..Default::default()
        };

        let session = CheckoutSession::create(client, params).await.map_err(|e| {
            tracing::error!(error = %e, "Failed to create checkout session");
            PaymentError::Api(e.to_string())
        })?;

        Ok(CreatedCheckout {
            session_id: session.id.to_string(),
            url: session.url,
        })
    }

    async fn retrieve_order(&self, session_id: &str) -> Result<OrderDetails, PaymentError> {
        let client = self.client()?;
        let id = parse_session_id(session_id)?;

        let session = CheckoutSession::retrieve(client, &id, EXPAND_LINE_ITEMS)
            .await
            .map_err(|e| PaymentError::Api(e.to_string()))?;

        order_from_session(&session)
    }

    async fn list_completed_orders(
        &self,
        limit: u64,
        starting_after: Option<String>,
    ) -> Result<OrderPage, PaymentError> {
        let client = self.client()?;

        let mut params = ListCheckoutSessions::new();
        params.limit = Some(limit.clamp(1, MAX_PAGE_SIZE));
        params.status = Some(CheckoutSessionStatus::Complete);
        params.expand = EXPAND_LIST_LINE_ITEMS;
        params.starting_after = starting_after
            .as_deref()
            .map(parse_session_id)
            .transpose()?;

        let sessions = CheckoutSession::list(client, &params)
            .await
            .map_err(|e| PaymentError::Api(e.to_string()))?;

        let orders = sessions
            .data
            .iter()
            .map(order_from_session)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(OrderPage {
            orders,
            has_more: sessions.has_more,
        })
    }
}
