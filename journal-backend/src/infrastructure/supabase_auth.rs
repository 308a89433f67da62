// src/infrastructure/supabase_auth.rs
//
// Supabase Auth (GoTrue) の REST API クライアント

use crate::config::SupabaseConfig;
use crate::infrastructure::identity::{
    AuthSession, AuthUser, IdentityError, IdentityProvider, NewUser, UserUpdate,
};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Map, Value};
use std::time::Duration;
use tracing::{debug, warn};

const USERS_PER_PAGE: usize = 1000;
/// 取得ページ数の上限（無限ループ防止）
const MAX_USER_PAGES: u32 = 100;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Deserialize)]
struct UserList {
    #[serde(default)]
    users: Vec<AuthUser>,
}

pub struct SupabaseAuthClient {
    http: Client,
    auth_url: String,
    anon_key: String,
    service_role_key: String,
}

impl SupabaseAuthClient {
    pub fn new(config: &SupabaseConfig) -> Result<Self, IdentityError> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| IdentityError::Transport(e.to_string()))?;

        Ok(Self {
            http,
            auth_url: config.auth_url(),
            anon_key: config.anon_key.clone(),
            service_role_key: config.service_role_key.clone(),
        })
    }

    /// service_role キーで管理 API を呼ぶ
    fn admin(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header("apikey", &self.service_role_key)
            .bearer_auth(&self.service_role_key)
    }

    /// anon キーでユーザー向け API を呼ぶ
    fn public(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.anon_key)
    }

    async fn send<T: DeserializeOwned>(builder: RequestBuilder) -> Result<T, IdentityError> {
        let response = builder
            .send()
            .await
            .map_err(|e| IdentityError::Transport(e.to_string()))?;
        let response = Self::check_status(response).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| IdentityError::UnexpectedResponse(e.to_string()))
    }

    async fn check_status(response: Response) -> Result<Response, IdentityError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body: Value = response.json().await.unwrap_or(Value::Null);
        let message = ["msg", "error_description", "message", "error"]
            .iter()
            .find_map(|key| body.get(*key).and_then(Value::as_str))
            .unwrap_or("unknown error")
            .to_string();

        Err(IdentityError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

fn hashed_token(link: &Value) -> Option<&str> {
    link.get("hashed_token")
        .or_else(|| link.get("properties").and_then(|p| p.get("hashed_token")))
        .and_then(Value::as_str)
        .filter(|token| !token.is_empty())
}

fn metadata_with_name(existing: &Value, name: &str) -> Value {
    let mut metadata = existing.as_object().cloned().unwrap_or_else(Map::new);
    metadata.insert("name".to_string(), Value::String(name.to_string()));
    Value::Object(metadata)
}

#[async_trait]
impl IdentityProvider for SupabaseAuthClient {
    async fn list_users(&self) -> Result<Vec<AuthUser>, IdentityError> {
        let mut users = Vec::new();

        for page in 1..=MAX_USER_PAGES {
            let request = self.admin(
                self.http
                    .get(format!("{}/admin/users", self.auth_url))
                    .query(&[("page", page.to_string()), ("per_page", USERS_PER_PAGE.to_string())]),
            );
            let batch: UserList = Self::send(request).await?;
            let fetched = batch.users.len();
            users.extend(batch.users);

            if fetched < USERS_PER_PAGE {
                break;
            }
        }

        debug!(count = users.len(), "Listed auth users");
        Ok(users)
    }

    async fn create_user(&self, user: NewUser) -> Result<AuthUser, IdentityError> {
        let name = user
            .name
            .clone()
            .unwrap_or_else(|| user.email.split('@').next().unwrap_or_default().to_string());

        let request = self.admin(self.http.post(format!("{}/admin/users", self.auth_url))).json(
            &json!({
                "email": user.email,
                "password": user.password,
                "email_confirm": true,
                "user_metadata": { "name": name, "verified_by_code": true },
            }),
        );
        Self::send(request).await
    }

    async fn update_user(
        &self,
        user: &AuthUser,
        update: UserUpdate,
    ) -> Result<AuthUser, IdentityError> {
        let mut body = Map::new();
        if let Some(password) = update.password {
            body.insert("password".to_string(), Value::String(password));
        }
        if update.email_confirm {
            body.insert("email_confirm".to_string(), Value::Bool(true));
        }
        if let Some(name) = update.name.as_deref() {
            body.insert(
                "user_metadata".to_string(),
                metadata_with_name(&user.user_metadata, name),
            );
        }

        let request = self
            .admin(self.http.put(format!("{}/admin/users/{}", self.auth_url, user.id)))
            .json(&Value::Object(body));
        Self::send(request).await
    }

    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, IdentityError> {
        let request = self
            .public(
                self.http
                    .post(format!("{}/token", self.auth_url))
                    .query(&[("grant_type", "password")]),
            )
            .json(&json!({ "email": email, "password": password }));

        match Self::send(request).await {
            Err(IdentityError::Api { status, message })
                if status == StatusCode::BAD_REQUEST.as_u16() =>
            {
                warn!(%message, "Password sign-in rejected");
                Err(IdentityError::InvalidCredentials)
            }
            other => other,
        }
    }

    async fn sign_in_with_magic_link(&self, email: &str) -> Result<AuthSession, IdentityError> {
        let request = self
            .admin(self.http.post(format!("{}/admin/generate_link", self.auth_url)))
            .json(&json!({ "type": "magiclink", "email": email }));
        let link: Value = Self::send(request).await?;

        let token_hash = hashed_token(&link).ok_or_else(|| {
            IdentityError::UnexpectedResponse("generate_link returned no hashed_token".to_string())
        })?;

        let request = self
            .public(self.http.post(format!("{}/verify", self.auth_url)))
            .json(&json!({ "type": "magiclink", "token_hash": token_hash }));
        Self::send(request).await
    }
}
