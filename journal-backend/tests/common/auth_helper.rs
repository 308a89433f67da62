// tests/common/auth_helper.rs

use super::app_helper::supabase_config;
use chrono::Utc;
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::{json, Value};
use uuid::Uuid;

fn sign(claims: Value) -> String {
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(supabase_config().jwt_secret.as_bytes()),
    )
    .unwrap()
}

/// Supabase が発行するのと同じ形のアクセストークン
pub fn access_token(user_id: Uuid) -> String {
    sign(json!({
        "sub": user_id.to_string(),
        "aud": "authenticated",
        "role": "authenticated",
        "email": format!("{}@example.com", &user_id.to_string()[..8]),
        "exp": Utc::now().timestamp() + 3600,
        "iat": Utc::now().timestamp(),
    }))
}

pub fn expired_token(user_id: Uuid) -> String {
    sign(json!({
        "sub": user_id.to_string(),
        "aud": "authenticated",
        "exp": Utc::now().timestamp() - 3600,
    }))
}

/// 新しいユーザー ID とそのトークン
pub fn test_user() -> (Uuid, String) {
    let user_id = Uuid::new_v4();
    (user_id, access_token(user_id))
}
