// src/repository/email_log_repository.rs
use crate::domain::email_log_model::{
    self, ActiveModel as EmailLogActiveModel, Entity as EmailLogEntity,
};
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::sea_query::Expr;
use sea_orm::{entity::*, query::*, DbConn, DbErr, FromQueryResult, PaginatorTrait};

/// 一覧の絞り込み条件
#[derive(Debug, Clone, Default)]
pub struct EmailLogFilter {
    pub email_type: Option<String>,
    pub status: Option<String>,
    /// 部分一致（大文字小文字を区別しない）
    pub email: Option<String>,
}

impl EmailLogFilter {
    fn condition(&self) -> Condition {
        let mut condition = Condition::all();
        if let Some(email_type) = &self.email_type {
            condition = condition.add(email_log_model::Column::EmailType.eq(email_type.as_str()));
        }
        if let Some(status) = &self.status {
            condition = condition.add(email_log_model::Column::Status.eq(status.as_str()));
        }
        if let Some(email) = &self.email {
            let pattern = format!("%{}%", escape_like(email));
            condition = condition.add(Expr::col(email_log_model::Column::Email).ilike(pattern));
        }
        condition
    }
}

fn escape_like(raw: &str) -> String {
    raw.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// (email_type, status) ごとの件数
#[derive(Debug, Clone, FromQueryResult)]
pub struct EmailLogCount {
    pub email_type: String,
    pub status: String,
    pub count: i64,
}

pub struct EmailLogRepository {
    db: DbConn,
}

impl EmailLogRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }

    pub async fn create(&self, log: EmailLogActiveModel) -> Result<email_log_model::Model, DbErr> {
        log.insert(&self.db).await
    }

    /// created_at 降順でページングした結果と、条件に合う総件数
    pub async fn search(
        &self,
        filter: &EmailLogFilter,
        limit: u64,
        offset: u64,
    ) -> Result<(Vec<email_log_model::Model>, u64), DbErr> {
        let logs = EmailLogEntity::find()
            .filter(filter.condition())
            .order_by_desc(email_log_model::Column::CreatedAt)
            .limit(limit)
            .offset(offset)
            .all(&self.db)
            .await?;

        let total = EmailLogEntity::find()
            .filter(filter.condition())
            .count(&self.db)
            .await?;

        Ok((logs, total))
    }

    /// 全ログの種別・状態ごとの件数（フィルタなし）
    pub async fn count_by_type_and_status(&self) -> Result<Vec<EmailLogCount>, DbErr> {
        EmailLogEntity::find()
            .select_only()
            .column(email_log_model::Column::EmailType)
            .column(email_log_model::Column::Status)
            .column_as(email_log_model::Column::Id.count(), "count")
            .group_by(email_log_model::Column::EmailType)
            .group_by(email_log_model::Column::Status)
            .into_model::<EmailLogCount>()
            .all(&self.db)
            .await
    }
}
