// src/repository/journal_entry_repository.rs
use crate::domain::journal_entry_model::{
    self, ActiveModel as JournalEntryActiveModel, Entity as JournalEntryEntity,
};
use chrono::NaiveDate;
use sea_orm::sea_query::OnConflict;
use sea_orm::{entity::*, query::*, DbConn, DbErr, Set};
use uuid::Uuid;

pub struct JournalEntryRepository {
    db: DbConn,
}

impl JournalEntryRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }

    pub async fn find_by_date(
        &self,
        user_id: Uuid,
        entry_date: NaiveDate,
    ) -> Result<Option<journal_entry_model::Model>, DbErr> {
        JournalEntryEntity::find()
            .filter(journal_entry_model::Column::UserId.eq(user_id))
            .filter(journal_entry_model::Column::EntryDate.eq(entry_date))
            .one(&self.db)
            .await
    }

    /// entry_date 降順
    pub async fn find_all_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<journal_entry_model::Model>, DbErr> {
        JournalEntryEntity::find()
            .filter(journal_entry_model::Column::UserId.eq(user_id))
            .order_by_desc(journal_entry_model::Column::EntryDate)
            .all(&self.db)
            .await
    }

    /// プログラム開始日（最初のエントリの日付）
    pub async fn first_entry_date(&self, user_id: Uuid) -> Result<Option<NaiveDate>, DbErr> {
        let first = JournalEntryEntity::find()
            .filter(journal_entry_model::Column::UserId.eq(user_id))
            .order_by_asc(journal_entry_model::Column::EntryDate)
            .one(&self.db)
            .await?;
        Ok(first.map(|entry| entry.entry_date))
    }

    /// (user_id, entry_date) で upsert する
    pub async fn upsert(
        &self,
        entry: JournalEntryActiveModel,
    ) -> Result<journal_entry_model::Model, DbErr> {
        use journal_entry_model::Column;

        JournalEntryEntity::insert(entry)
            .on_conflict(
                OnConflict::columns([Column::UserId, Column::EntryDate])
                    .update_columns([
                        Column::DayNumber,
                        Column::Gratitude,
                        Column::Priority1,
                        Column::Priority2,
                        Column::Priority3,
                        Column::Tasks,
                        Column::Reflection,
                        Column::Mood,
                        Column::Completed,
                        Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec_with_returning(&self.db)
            .await
    }

    pub async fn update_streak(
        &self,
        entry: journal_entry_model::Model,
        streak: i32,
    ) -> Result<journal_entry_model::Model, DbErr> {
        let mut active: JournalEntryActiveModel = entry.into();
        active.streak = Set(streak);
        active.update(&self.db).await
    }
}
