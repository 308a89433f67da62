// src/repository/goal_repository.rs
use crate::domain::goal_model::{self, ActiveModel as GoalActiveModel, Entity as GoalEntity};
use chrono::NaiveDate;
use sea_orm::{entity::*, query::*, DbConn, DbErr};
use uuid::Uuid;

pub struct GoalRepository {
    db: DbConn,
}

impl GoalRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }

    pub async fn find_all_for_user(
        &self,
        user_id: Uuid,
        entry_date: Option<NaiveDate>,
    ) -> Result<Vec<goal_model::Model>, DbErr> {
        let mut query = GoalEntity::find().filter(goal_model::Column::UserId.eq(user_id));
        if let Some(date) = entry_date {
            query = query.filter(goal_model::Column::EntryDate.eq(date));
        }
        query
            .order_by_desc(goal_model::Column::CreatedAt)
            .all(&self.db)
            .await
    }

    pub async fn find_active_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<goal_model::Model>, DbErr> {
        GoalEntity::find()
            .filter(goal_model::Column::UserId.eq(user_id))
            .filter(goal_model::Column::Status.eq(goal_model::STATUS_ACTIVE))
            .order_by_desc(goal_model::Column::CreatedAt)
            .all(&self.db)
            .await
    }

    pub async fn find_by_id_for_user(
        &self,
        user_id: Uuid,
        id: Uuid,
    ) -> Result<Option<goal_model::Model>, DbErr> {
        GoalEntity::find_by_id(id)
            .filter(goal_model::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
    }

    pub async fn create(&self, goal: GoalActiveModel) -> Result<goal_model::Model, DbErr> {
        goal.insert(&self.db).await
    }

    pub async fn update(&self, goal: GoalActiveModel) -> Result<goal_model::Model, DbErr> {
        goal.update(&self.db).await
    }

    /// 削除件数を返す（所有者以外の行には触れない）
    pub async fn delete_for_user(&self, user_id: Uuid, id: Uuid) -> Result<u64, DbErr> {
        let result = GoalEntity::delete_many()
            .filter(goal_model::Column::Id.eq(id))
            .filter(goal_model::Column::UserId.eq(user_id))
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected)
    }
}
