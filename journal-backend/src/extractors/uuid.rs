// src/extractors/uuid.rs
use crate::error::AppError;
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use uuid::Uuid;

/// パスパラメータ `{id}` を UUID として取り出す。不正な値は 400
#[derive(Debug, Clone, Copy)]
pub struct ValidatedUuid(pub Uuid);

impl<S> FromRequestParts<S> for ValidatedUuid
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::BadRequest("Invalid path parameter".to_string()))?;

        let id = Uuid::parse_str(raw.trim())
            .map_err(|_| AppError::BadRequest(format!("Invalid id format: '{}'", raw)))?;

        Ok(ValidatedUuid(id))
    }
}
