// src/api/dto/common.rs
use serde::Serialize;

/// 成功だけを返すレスポンス
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct HealthResponse {
    pub status: &'static str,
}
