// src/repository/foundation_repository.rs
use crate::domain::foundation_model::{
    self, ActiveModel as FoundationActiveModel, Entity as FoundationEntity,
};
use chrono::NaiveDate;
use sea_orm::{entity::*, query::*, DbConn, DbErr};
use uuid::Uuid;

pub struct FoundationRepository {
    db: DbConn,
}

impl FoundationRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }

    /// 一覧画面用（entry_date 降順）
    pub async fn find_all_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<foundation_model::Model>, DbErr> {
        FoundationEntity::find()
            .filter(foundation_model::Column::UserId.eq(user_id))
            .order_by_desc(foundation_model::Column::EntryDate)
            .order_by_desc(foundation_model::Column::CreatedAt)
            .all(&self.db)
            .await
    }

    /// 日付指定（任意）で作成日時の降順
    pub async fn find_by_date(
        &self,
        user_id: Uuid,
        entry_date: Option<NaiveDate>,
    ) -> Result<Vec<foundation_model::Model>, DbErr> {
        let mut query =
            FoundationEntity::find().filter(foundation_model::Column::UserId.eq(user_id));
        if let Some(date) = entry_date {
            query = query.filter(foundation_model::Column::EntryDate.eq(date));
        }
        query
            .order_by_desc(foundation_model::Column::CreatedAt)
            .all(&self.db)
            .await
    }

    pub async fn find_by_id_for_user(
        &self,
        user_id: Uuid,
        id: Uuid,
    ) -> Result<Option<foundation_model::Model>, DbErr> {
        FoundationEntity::find_by_id(id)
            .filter(foundation_model::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
    }

    pub async fn create(
        &self,
        foundation: FoundationActiveModel,
    ) -> Result<foundation_model::Model, DbErr> {
        foundation.insert(&self.db).await
    }

    pub async fn update(
        &self,
        foundation: FoundationActiveModel,
    ) -> Result<foundation_model::Model, DbErr> {
        foundation.update(&self.db).await
    }

    pub async fn delete_for_user(&self, user_id: Uuid, id: Uuid) -> Result<u64, DbErr> {
        let result = FoundationEntity::delete_many()
            .filter(foundation_model::Column::Id.eq(id))
            .filter(foundation_model::Column::UserId.eq(user_id))
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected)
    }
}
