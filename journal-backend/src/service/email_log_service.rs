// src/service/email_log_service.rs

use crate::api::dto::email_log_dto::{
    EmailLogQuery, EmailLogStats, EmailLogsResponse, PaginationDto, DEFAULT_LOG_LIMIT,
    MAX_LOG_LIMIT,
};
use crate::error::AppResult;
use crate::repository::email_log_repository::{EmailLogFilter, EmailLogRepository};
use crate::utils::validation::trimmed;
use std::sync::Arc;

pub struct EmailLogService {
    repo: Arc<EmailLogRepository>,
}

impl EmailLogService {
    pub fn new(repo: Arc<EmailLogRepository>) -> Self {
        Self { repo }
    }

    pub async fn search(&self, query: EmailLogQuery) -> AppResult<EmailLogsResponse> {
        let limit = query
            .limit
            .unwrap_or(DEFAULT_LOG_LIMIT)
            .clamp(1, MAX_LOG_LIMIT);
        let offset = query.offset.unwrap_or(0);
        let filter = EmailLogFilter {
            email_type: trimmed(query.email_type),
            status: trimmed(query.status),
            email: trimmed(query.email),
        };

        let (logs, total) = self.repo.search(&filter, limit, offset).await?;
        let counts = self.repo.count_by_type_and_status().await?;

        Ok(EmailLogsResponse {
            success: true,
            logs,
            pagination: PaginationDto::new(total, limit, offset),
            stats: EmailLogStats::from_counts(&counts),
        })
    }
}
