// tests/common/stripe_helper.rs

use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use serde_json::{json, Value};
use sha2::Sha256;

/// Stripe-Signature ヘッダー値を生成（v1 = HMAC-SHA256("{t}.{payload}")）
pub fn sign_payload(payload: &str, secret: &str, timestamp: i64) -> String {
    let mut mac =
        Hmac::<Sha256>::new_from_slice(secret.as_bytes()).expect("hmac accepts any key length");
    mac.update(format!("{}.{}", timestamp, payload).as_bytes());
    format!("t={},v1={}", timestamp, hex::encode(mac.finalize().into_bytes()))
}

/// テスト用のWebhookイベントペイロードを作成
pub fn webhook_payload(event_type: &str, data: Value) -> String {
    json!({
        "id": format!("evt_test_{}", uuid::Uuid::new_v4().simple()),
        "object": "event",
        "api_version": "2024-04-10",
        "created": Utc::now().timestamp(),
        "data": {
            "object": data
        },
        "livemode": false,
        "pending_webhooks": 1,
        "request": {
            "id": null,
            "idempotency_key": null
        },
        "type": event_type
    })
    .to_string()
}

/// 支払い済み Checkout Session（ジャーナル購入）
pub fn checkout_session_json(
    session_id: &str,
    email: Option<&str>,
    created: DateTime<Utc>,
) -> Value {
    let timestamp = created.timestamp();
    json!({
        "id": session_id,
        "object": "checkout.session",
        "amount_subtotal": 1999,
        "amount_total": 1999,
        "automatic_tax": { "enabled": false, "liability": null, "status": null },
        "cancel_url": "http://localhost:3000/checkout/cancel",
        "created": timestamp,
        "currency": "gbp",
        "custom_fields": [],
        "custom_text": {
            "after_submit": null,
            "shipping_address": null,
            "submit": null,
            "terms_of_service_acceptance": null
        },
        "customer_email": email,
        "customer_details": {
            "email": email,
            "name": "Ada Buyer",
            "phone": "+44 20 7946 0000",
            "address": { "line1": "1 Billing Way", "city": "London", "postal_code": "N1 1AA", "country": "GB" },
            "tax_exempt": "none",
            "tax_ids": []
        },
        "expires_at": timestamp + 1800,
        "livemode": false,
        "metadata": { "product": "leverage-journal", "itemCount": "1" },
        "mode": "payment",
        "payment_method_types": ["card"],
        "payment_status": "paid",
        "shipping_details": {
            "name": "Ada Buyer",
            "address": { "line1": "2 Delivery Road", "city": "London", "postal_code": "E1 6AN", "country": "GB" }
        },
        "shipping_options": [],
        "status": "complete",
        "success_url": "http://localhost:3000/checkout/success",
        "total_details": { "amount_discount": 0, "amount_shipping": 0, "amount_tax": 0 },
        "ui_mode": "hosted"
    })
}

/// line_items を展開した状態の Session
pub fn with_line_items(mut session: Value, description: &str, quantity: u64) -> Value {
    session["line_items"] = json!({
        "object": "list",
        "data": [{
            "id": "li_test_journal",
            "object": "item",
            "amount_discount": 0,
            "amount_subtotal": 1999,
            "amount_tax": 0,
            "amount_total": 1999,
            "currency": "gbp",
            "description": description,
            "quantity": quantity
        }],
        "has_more": false,
        "url": "/v1/checkout/sessions/line_items"
    });
    session
}

/// checkout.session.completed の署名付きリクエスト材料
pub fn signed_checkout_completed(session: Value, secret: &str) -> (String, String) {
    let payload = webhook_payload("checkout.session.completed", session);
    let signature = sign_payload(&payload, secret, Utc::now().timestamp());
    (payload, signature)
}
