// tests/common/mock_services.rs
//
// 外部サービス（Stripe / SMTP / Supabase Auth）のメモリ上の実装

use async_trait::async_trait;
use journal_backend::domain::order::OrderDetails;
use journal_backend::infrastructure::identity::{
    AuthSession, AuthUser, IdentityError, IdentityProvider, NewUser, UserUpdate,
};
use journal_backend::infrastructure::payment_gateway::{
    CheckoutRequest, CreatedCheckout, OrderPage, PaymentError, PaymentGateway,
};
use journal_backend::utils::email::{EmailError, EmailMessage, Mailer};
use serde_json::json;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use uuid::Uuid;

pub const FAKE_SESSION_ID: &str = "cs_test_fake_session";

#[derive(Default)]
pub struct FakePaymentGateway {
    orders: Mutex<HashMap<String, OrderDetails>>,
    completed: Vec<OrderDetails>,
    has_more: bool,
    pub checkout_requests: Mutex<Vec<CheckoutRequest>>,
    pub list_calls: Mutex<Vec<(u64, Option<String>)>>,
}

impl FakePaymentGateway {
    pub fn with_order(order: OrderDetails) -> Self {
        let gateway = Self::default();
        gateway
            .orders
            .lock()
            .unwrap()
            .insert(order.session_id.clone(), order);
        gateway
    }

    pub fn with_completed(orders: Vec<OrderDetails>, has_more: bool) -> Self {
        Self {
            completed: orders,
            has_more,
            ..Default::default()
        }
    }
}

#[async_trait]
impl PaymentGateway for FakePaymentGateway {
    async fn create_checkout_session(
        &self,
        request: CheckoutRequest,
    ) -> Result<CreatedCheckout, PaymentError> {
        self.checkout_requests.lock().unwrap().push(request);
        Ok(CreatedCheckout {
            session_id: FAKE_SESSION_ID.to_string(),
            url: Some(format!("https://checkout.stripe.com/c/pay/{}", FAKE_SESSION_ID)),
        })
    }

    async fn retrieve_order(&self, session_id: &str) -> Result<OrderDetails, PaymentError> {
        self.orders
            .lock()
            .unwrap()
            .get(session_id)
            .cloned()
            .ok_or_else(|| {
                PaymentError::InvalidRequest(format!("No such checkout.session: {}", session_id))
            })
    }

    async fn list_completed_orders(
        &self,
        limit: u64,
        starting_after: Option<String>,
    ) -> Result<OrderPage, PaymentError> {
        self.list_calls
            .lock()
            .unwrap()
            .push((limit, starting_after));
        Ok(OrderPage {
            orders: self.completed.clone(),
            has_more: self.has_more,
        })
    }
}

/// 送信内容を記録するだけのメーラー。指定した宛先への送信は失敗させる
#[derive(Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<EmailMessage>>,
    failing: HashSet<String>,
}

impl RecordingMailer {
    pub fn failing_for(emails: &[&str]) -> Self {
        Self {
            failing: emails.iter().map(|e| e.to_string()).collect(),
            ..Default::default()
        }
    }

    pub fn sent(&self) -> Vec<EmailMessage> {
        self.sent.lock().unwrap().clone()
    }

    pub fn sent_to(&self, email: &str) -> Vec<EmailMessage> {
        self.sent()
            .into_iter()
            .filter(|m| m.to_email == email)
            .collect()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, message: &EmailMessage) -> Result<(), EmailError> {
        if self.failing.contains(&message.to_email) {
            return Err(EmailError::SendError("connection refused".to_string()));
        }
        self.sent.lock().unwrap().push(message.clone());
        Ok(())
    }
}

/// Supabase Auth の代わり
#[derive(Default)]
pub struct FakeIdentityProvider {
    pub users: Mutex<Vec<AuthUser>>,
    pub created: Mutex<Vec<NewUser>>,
    pub updated: Mutex<Vec<(String, UserUpdate)>>,
    pub fail_list_users: bool,
    pub password_sign_in_fails: bool,
    pub magic_link_fails: bool,
}

impl FakeIdentityProvider {
    pub fn with_users(users: Vec<AuthUser>) -> Self {
        Self {
            users: Mutex::new(users),
            ..Default::default()
        }
    }

    fn session_for(&self, email: &str) -> AuthSession {
        let user = self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.has_email(email))
            .cloned()
            .unwrap_or_else(|| AuthUser {
                id: Uuid::new_v4().to_string(),
                email: Some(email.to_string()),
                user_metadata: json!({}),
            });

        AuthSession {
            access_token: format!("access-token-for-{}", email),
            refresh_token: Some("refresh-token".to_string()),
            expires_in: Some(3600),
            expires_at: None,
            token_type: Some("bearer".to_string()),
            user,
        }
    }
}

#[async_trait]
impl IdentityProvider for FakeIdentityProvider {
    async fn list_users(&self) -> Result<Vec<AuthUser>, IdentityError> {
        if self.fail_list_users {
            return Err(IdentityError::Api {
                status: 500,
                message: "auth service unavailable".to_string(),
            });
        }
        Ok(self.users.lock().unwrap().clone())
    }

    async fn create_user(&self, user: NewUser) -> Result<AuthUser, IdentityError> {
        let created = AuthUser {
            id: Uuid::new_v4().to_string(),
            email: Some(user.email.clone()),
            user_metadata: json!({ "name": user.name.clone() }),
        };
        self.users.lock().unwrap().push(created.clone());
        self.created.lock().unwrap().push(user);
        Ok(created)
    }

    async fn update_user(
        &self,
        user: &AuthUser,
        update: UserUpdate,
    ) -> Result<AuthUser, IdentityError> {
        self.updated
            .lock()
            .unwrap()
            .push((user.id.clone(), update));
        Ok(user.clone())
    }

    async fn sign_in_with_password(
        &self,
        email: &str,
        _password: &str,
    ) -> Result<AuthSession, IdentityError> {
        if self.password_sign_in_fails {
            return Err(IdentityError::InvalidCredentials);
        }
        Ok(self.session_for(email))
    }

    async fn sign_in_with_magic_link(&self, email: &str) -> Result<AuthSession, IdentityError> {
        if self.magic_link_fails {
            return Err(IdentityError::Api {
                status: 422,
                message: "magic link disabled".to_string(),
            });
        }
        Ok(self.session_for(email))
    }
}
