// src/repository/order_confirmation_repository.rs
use crate::domain::order_confirmation_model::{
    self, ConfirmationStatus, ConfirmationTrigger, Entity as OrderConfirmationEntity,
};
use chrono::{DateTime, Utc};
use sea_orm::{ConnectionTrait, DbBackend, DbConn, DbErr, EntityTrait, Statement};

pub struct OrderConfirmationRepository {
    db: DbConn,
}

impl OrderConfirmationRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }

    pub async fn find(
        &self,
        session_id: &str,
    ) -> Result<Option<order_confirmation_model::Model>, DbErr> {
        OrderConfirmationEntity::find_by_id(session_id.to_string())
            .one(&self.db)
            .await
    }

    /// レコードがなければ作成して送信権を得る。作成できたら true
    pub async fn try_insert_claim(
        &self,
        session_id: &str,
        trigger: ConfirmationTrigger,
        customer_email: &str,
        now: DateTime<Utc>,
    ) -> Result<bool, DbErr> {
        let result = self
            .db
            .execute(Statement::from_sql_and_values(
                DbBackend::Postgres,
                r#"INSERT INTO order_confirmations
                    (session_id, status, confirmed_by, attempts, customer_email, claimed_at, created_at, updated_at)
                VALUES ($1, $2, $3, 1, $4, $5, $5, $5)
                ON CONFLICT (session_id) DO NOTHING"#,
                [
                    session_id.into(),
                    ConfirmationStatus::Pending.as_str().into(),
                    trigger.as_str().into(),
                    customer_email.into(),
                    now.into(),
                ],
            ))
            .await?;
        Ok(result.rows_affected() == 1)
    }

    /// 失敗済み、または放置された送信中レコードを取り直す。取れたら true
    pub async fn try_reclaim(
        &self,
        session_id: &str,
        trigger: ConfirmationTrigger,
        now: DateTime<Utc>,
        stale_before: DateTime<Utc>,
    ) -> Result<bool, DbErr> {
        let result = self
            .db
            .execute(Statement::from_sql_and_values(
                DbBackend::Postgres,
                r#"UPDATE order_confirmations
                SET status = $2, confirmed_by = $3, attempts = attempts + 1,
                    claimed_at = $4, last_error = NULL, updated_at = $4
                WHERE session_id = $1
                  AND (status = $5 OR (status = $2 AND claimed_at < $6))"#,
                [
                    session_id.into(),
                    ConfirmationStatus::Pending.as_str().into(),
                    trigger.as_str().into(),
                    now.into(),
                    ConfirmationStatus::Failed.as_str().into(),
                    stale_before.into(),
                ],
            ))
            .await?;
        Ok(result.rows_affected() == 1)
    }

    pub async fn mark_sent(&self, session_id: &str, now: DateTime<Utc>) -> Result<(), DbErr> {
        self.db
            .execute(Statement::from_sql_and_values(
                DbBackend::Postgres,
                r#"UPDATE order_confirmations
                SET status = $2, sent_at = $3, last_error = NULL, updated_at = $3
                WHERE session_id = $1"#,
                [
                    session_id.into(),
                    ConfirmationStatus::Sent.as_str().into(),
                    now.into(),
                ],
            ))
            .await?;
        Ok(())
    }

    pub async fn mark_failed(
        &self,
        session_id: &str,
        error: &str,
        now: DateTime<Utc>,
    ) -> Result<(), DbErr> {
        self.db
            .execute(Statement::from_sql_and_values(
                DbBackend::Postgres,
                r#"UPDATE order_confirmations
                SET status = $2, last_error = $3, updated_at = $4
                WHERE session_id = $1"#,
                [
                    session_id.into(),
                    ConfirmationStatus::Failed.as_str().into(),
                    error.into(),
                    now.into(),
                ],
            ))
            .await?;
        Ok(())
    }
}
