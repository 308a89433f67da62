// src/domain/order.rs

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

pub const PRODUCT_NAME: &str = "Leverage Journal - First Edition A5";
pub const PRODUCT_DESCRIPTION: &str = "90-Day Transformation System - Premium goal setting journal";
pub const PRODUCT_IMAGE_URL: &str = "https://leveragejournal.com/images/journal-product.png";
pub const PRODUCT_METADATA_KEY: &str = "leverage-journal";
/// 単価（ペンス）
pub const UNIT_AMOUNT_PENCE: i64 = 1999;

/// Stripe の住所オブジェクト
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub line1: Option<String>,
    pub line2: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
}

impl Address {
    /// 空でない要素を ", " で連結する。何もなければ None
    pub fn format(&self) -> Option<String> {
        let parts: Vec<&str> = [
            &self.line1,
            &self.line2,
            &self.city,
            &self.state,
            &self.postal_code,
            &self.country,
        ]
        .into_iter()
        .filter_map(|part| part.as_deref())
        .filter(|part| !part.is_empty())
        .collect();

        if parts.is_empty() {
            None
        } else {
            Some(parts.join(", "))
        }
    }
}

/// 決済済みセッションから組み立てた注文情報
#[derive(Clone, Debug, PartialEq)]
pub struct OrderDetails {
    pub session_id: String,
    pub customer_email: Option<String>,
    pub customer_name: Option<String>,
    pub phone: Option<String>,
    pub product_name: String,
    pub quantity: u64,
    /// ペンス単位
    pub amount_total: i64,
    pub currency: Option<String>,
    pub payment_status: Option<String>,
    pub status: Option<String>,
    pub created: DateTime<Utc>,
    pub metadata: HashMap<String, String>,
    pub shipping_address: Option<Address>,
    pub billing_address: Option<Address>,
    pub shipping_name: Option<String>,
}

fn str_at<'a>(value: &'a Value, path: &[&str]) -> Option<&'a str> {
    let mut current = value;
    for key in path {
        current = current.get(key)?;
    }
    current.as_str().filter(|s| !s.is_empty())
}

fn address_at(value: &Value, path: &[&str]) -> Option<Address> {
    let mut current = value;
    for key in path {
        current = current.get(key)?;
    }
    if current.is_null() {
        return None;
    }
    serde_json::from_value(current.clone()).ok()
}

impl OrderDetails {
    /// Checkout Session と line item の JSON 表現から注文情報を作る。
    /// API バージョンによって配送先の位置が変わるため両方を見る
    pub fn from_stripe_json(session: &Value, line_items: &[Value]) -> Self {
        let metadata: HashMap<String, String> = session
            .get("metadata")
            .and_then(|m| m.as_object())
            .map(|m| {
                m.iter()
                    .filter_map(|(k, v)| v.as_str().map(|v| (k.clone(), v.to_string())))
                    .collect()
            })
            .unwrap_or_default();

        let first_item = line_items.first();
        let product_name = first_item
            .and_then(|item| str_at(item, &["description"]))
            .map(str::to_string)
            .or_else(|| metadata.get("product").cloned())
            .unwrap_or_else(|| PRODUCT_NAME.to_string());
        let quantity = first_item
            .and_then(|item| item.get("quantity"))
            .and_then(Value::as_u64)
            .filter(|q| *q > 0)
            .or_else(|| {
                metadata
                    .get("itemCount")
                    .and_then(|count| count.parse::<u64>().ok())
            })
            .unwrap_or(1);

        let created = session
            .get("created")
            .and_then(Value::as_i64)
            .and_then(|ts| Utc.timestamp_opt(ts, 0).single())
            .unwrap_or_else(Utc::now);

        Self {
            session_id: str_at(session, &["id"]).unwrap_or_default().to_string(),
            customer_email: str_at(session, &["customer_email"])
                .or_else(|| str_at(session, &["customer_details", "email"]))
                .map(str::to_string),
            customer_name: str_at(session, &["customer_details", "name"]).map(str::to_string),
            phone: str_at(session, &["customer_details", "phone"])
                .or_else(|| str_at(session, &["shipping_details", "phone"]))
                .map(str::to_string),
            product_name,
            quantity,
            amount_total: session
                .get("amount_total")
                .and_then(Value::as_i64)
                .unwrap_or(0),
            currency: str_at(session, &["currency"]).map(str::to_string),
            payment_status: str_at(session, &["payment_status"]).map(str::to_string),
            status: str_at(session, &["status"]).map(str::to_string),
            created,
            metadata,
            shipping_address: address_at(session, &["shipping_details", "address"])
                .or_else(|| address_at(session, &["collected_information", "shipping_details", "address"]))
                .or_else(|| address_at(session, &["customer_details", "shipping", "address"])),
            billing_address: address_at(session, &["customer_details", "address"]),
            shipping_name: str_at(session, &["shipping_details", "name"])
                .or_else(|| str_at(session, &["collected_information", "shipping_details", "name"]))
                .or_else(|| str_at(session, &["customer_details", "shipping", "name"]))
                .map(str::to_string),
        }
    }

    pub fn is_paid(&self) -> bool {
        self.payment_status.as_deref() == Some("paid")
    }

    /// "£19.99" 形式の表示価格
    pub fn formatted_price(&self) -> String {
        format_price(self.amount_total)
    }

    /// Leverage Journal の注文かどうか（同じ Stripe アカウントの他商品を除外する）
    pub fn is_leverage_journal(&self) -> bool {
        let name = self.product_name.to_lowercase();
        let metadata_product = self
            .metadata
            .get("product")
            .map(|p| p.to_lowercase())
            .unwrap_or_default();

        name.contains("leverage")
            || name.contains("journal")
            || name.contains("leveragejournel")
            || metadata_product.contains(PRODUCT_METADATA_KEY)
    }
}

pub fn format_price(amount_pence: i64) -> String {
    let sign = if amount_pence < 0 { "-" } else { "" };
    let abs = amount_pence.unsigned_abs();
    format!("{}£{}.{:02}", sign, abs / 100, abs % 100)
}

/// GET /api/orders の1件分
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
    pub order_id: String,
    pub customer_email: String,
    pub customer_name: String,
    pub phone: String,
    pub product_name: String,
    pub quantity: u64,
    pub price: String,
    /// ポンド単位
    pub amount_total: f64,
    pub currency: String,
    pub payment_status: Option<String>,
    pub status: Option<String>,
    pub created_at: String,
    pub metadata: HashMap<String, String>,
    pub shipping_address: Option<String>,
    pub shipping_address_raw: Option<Address>,
    pub billing_address: Option<String>,
    pub billing_address_raw: Option<Address>,
    pub shipping_name: Option<String>,
}

impl From<OrderDetails> for OrderSummary {
    fn from(order: OrderDetails) -> Self {
        Self {
            price: order.formatted_price(),
            amount_total: order.amount_total as f64 / 100.0,
            currency: order
                .currency
                .as_deref()
                .map(str::to_uppercase)
                .unwrap_or_else(|| "GBP".to_string()),
            created_at: order.created.to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
            customer_email: order
                .customer_email
                .unwrap_or_else(|| "No email".to_string()),
            customer_name: order
                .customer_name
                .or_else(|| order.shipping_name.clone())
                .unwrap_or_else(|| "Not provided".to_string()),
            phone: order.phone.unwrap_or_else(|| "Not provided".to_string()),
            shipping_address: order.shipping_address.as_ref().and_then(Address::format),
            billing_address: order.billing_address.as_ref().and_then(Address::format),
            order_id: order.session_id,
            product_name: order.product_name,
            quantity: order.quantity,
            payment_status: order.payment_status,
            status: order.status,
            metadata: order.metadata,
            shipping_address_raw: order.shipping_address,
            billing_address_raw: order.billing_address,
            shipping_name: order.shipping_name,
        }
    }
}
