use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(JournalEntries::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(JournalEntries::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(JournalEntries::UserId).uuid().not_null())
                    .col(ColumnDef::new(JournalEntries::EntryDate).date().not_null())
                    .col(
                        ColumnDef::new(JournalEntries::DayNumber)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .col(ColumnDef::new(JournalEntries::Gratitude).text())
                    .col(ColumnDef::new(JournalEntries::Priority1).text())
                    .col(ColumnDef::new(JournalEntries::Priority2).text())
                    .col(ColumnDef::new(JournalEntries::Priority3).text())
                    .col(
                        ColumnDef::new(JournalEntries::Tasks)
                            .json_binary()
                            .not_null()
                            .default(Expr::cust("'[]'::jsonb")),
                    )
                    .col(ColumnDef::new(JournalEntries::Reflection).text())
                    .col(ColumnDef::new(JournalEntries::Mood).text())
                    .col(
                        ColumnDef::new(JournalEntries::Completed)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(JournalEntries::Streak)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(JournalEntries::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(JournalEntries::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // 1ユーザー1日1エントリ（upsertの衝突キー）
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .table(JournalEntries::Table)
                    .name("idx_journal_entries_user_date")
                    .col(JournalEntries::UserId)
                    .col(JournalEntries::EntryDate)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(JournalEntries::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum JournalEntries {
    Table,
    Id,
    UserId,
    EntryDate,
    DayNumber,
    Gratitude,
    #[sea_orm(iden = "priority_1")]
    Priority1,
    #[sea_orm(iden = "priority_2")]
    Priority2,
    #[sea_orm(iden = "priority_3")]
    Priority3,
    Tasks,
    Reflection,
    Mood,
    Completed,
    Streak,
    CreatedAt,
    UpdatedAt,
}
