// src/repository/weekly_review_repository.rs
use crate::domain::weekly_review_model::{
    self, ActiveModel as WeeklyReviewActiveModel, Entity as WeeklyReviewEntity,
};
use chrono::NaiveDate;
use sea_orm::sea_query::OnConflict;
use sea_orm::{entity::*, query::*, DbConn, DbErr};
use uuid::Uuid;

pub struct WeeklyReviewRepository {
    db: DbConn,
}

impl WeeklyReviewRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }

    pub async fn find_all_for_user(
        &self,
        user_id: Uuid,
        week_start: Option<NaiveDate>,
    ) -> Result<Vec<weekly_review_model::Model>, DbErr> {
        let mut query =
            WeeklyReviewEntity::find().filter(weekly_review_model::Column::UserId.eq(user_id));
        if let Some(start) = week_start {
            query = query.filter(weekly_review_model::Column::WeekStartDate.eq(start));
        }
        query
            .order_by_desc(weekly_review_model::Column::WeekStartDate)
            .all(&self.db)
            .await
    }

    /// [from, to] と期間が重なるレビューがあるか
    pub async fn exists_overlapping(
        &self,
        user_id: Uuid,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<bool, DbErr> {
        let review = WeeklyReviewEntity::find()
            .filter(weekly_review_model::Column::UserId.eq(user_id))
            .filter(weekly_review_model::Column::WeekStartDate.lte(to))
            .filter(weekly_review_model::Column::WeekEndDate.gte(from))
            .one(&self.db)
            .await?;
        Ok(review.is_some())
    }

    /// (user_id, week_start_date) で upsert する
    pub async fn upsert(
        &self,
        review: WeeklyReviewActiveModel,
    ) -> Result<weekly_review_model::Model, DbErr> {
        use weekly_review_model::Column;

        WeeklyReviewEntity::insert(review)
            .on_conflict(
                OnConflict::columns([Column::UserId, Column::WeekStartDate])
                    .update_columns([
                        Column::WeekEndDate,
                        Column::WeekNumber,
                        Column::Wins,
                        Column::Obstacles,
                        Column::Lessons,
                        Column::NextSteps,
                        Column::AiSummary,
                        Column::Trends,
                        Column::Insights,
                        Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec_with_returning(&self.db)
            .await
    }
}
