// src/repository/verification_code_repository.rs
use crate::domain::verification_code_model::{
    self, ActiveModel as VerificationCodeActiveModel, Entity as VerificationCodeEntity,
};
use chrono::{DateTime, Utc};
use sea_orm::{entity::*, query::*, DbConn, DbErr, Set};

pub struct VerificationCodeRepository {
    db: DbConn,
}

impl VerificationCodeRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        code: VerificationCodeActiveModel,
    ) -> Result<verification_code_model::Model, DbErr> {
        code.insert(&self.db).await
    }

    /// 未使用かつ有効期限内で最も新しいコード
    pub async fn find_valid(
        &self,
        email: &str,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<verification_code_model::Model>, DbErr> {
        VerificationCodeEntity::find()
            .filter(verification_code_model::Column::Email.eq(email))
            .filter(verification_code_model::Column::Code.eq(code))
            .filter(verification_code_model::Column::Used.eq(false))
            .filter(verification_code_model::Column::ExpiresAt.gt(now))
            .order_by_desc(verification_code_model::Column::CreatedAt)
            .one(&self.db)
            .await
    }

    /// 使用済みにしてパスワードを消す
    pub async fn consume(
        &self,
        code: verification_code_model::Model,
    ) -> Result<verification_code_model::Model, DbErr> {
        let mut active: VerificationCodeActiveModel = code.into();
        active.used = Set(true);
        active.pending_password = Set(None);
        active.update(&self.db).await
    }
}
