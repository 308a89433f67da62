// src/api/dto/email_log_dto.rs
use crate::domain::email_log_model;
use crate::repository::email_log_repository::EmailLogCount;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const DEFAULT_LOG_LIMIT: u64 = 100;
pub const MAX_LOG_LIMIT: u64 = 1000;

#[derive(Deserialize, Debug, Default)]
pub struct EmailLogQuery {
    #[serde(rename = "type")]
    pub email_type: Option<String>,
    pub status: Option<String>,
    pub email: Option<String>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PaginationDto {
    pub total: u64,
    pub limit: u64,
    pub offset: u64,
    pub has_more: bool,
}

impl PaginationDto {
    pub fn new(total: u64, limit: u64, offset: u64) -> Self {
        Self {
            total,
            limit,
            offset,
            has_more: total > offset + limit,
        }
    }
}

#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub sent: i64,
    pub failed: i64,
}

/// 全ログの集計（絞り込み条件には依存しない）
#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EmailLogStats {
    pub total: i64,
    pub by_type: BTreeMap<String, i64>,
    pub by_status: StatusCounts,
}

impl EmailLogStats {
    pub fn from_counts(counts: &[EmailLogCount]) -> Self {
        let mut stats = Self::default();
        for row in counts {
            stats.total += row.count;
            *stats.by_type.entry(row.email_type.clone()).or_insert(0) += row.count;
            match row.status.as_str() {
                email_log_model::STATUS_SENT => stats.by_status.sent += row.count,
                email_log_model::STATUS_FAILED => stats.by_status.failed += row.count,
                _ => {}
            }
        }
        stats
    }
}

#[derive(Serialize, Debug)]
pub struct EmailLogsResponse {
    pub success: bool,
    pub logs: Vec<email_log_model::Model>,
    pub pagination: PaginationDto,
    pub stats: EmailLogStats,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct TestEmailResponse {
    pub success: bool,
    pub message: String,
    pub sent: usize,
    pub failed: usize,
    pub total: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failed_emails: Option<Vec<String>>,
}
