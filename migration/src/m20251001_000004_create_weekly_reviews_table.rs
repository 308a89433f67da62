use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(WeeklyReviews::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(WeeklyReviews::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(WeeklyReviews::UserId).uuid().not_null())
                    .col(ColumnDef::new(WeeklyReviews::WeekStartDate).date().not_null())
                    .col(ColumnDef::new(WeeklyReviews::WeekEndDate).date().not_null())
                    .col(ColumnDef::new(WeeklyReviews::WeekNumber).integer().not_null())
                    .col(ColumnDef::new(WeeklyReviews::Wins).text())
                    .col(ColumnDef::new(WeeklyReviews::Obstacles).text())
                    .col(ColumnDef::new(WeeklyReviews::Lessons).text())
                    .col(ColumnDef::new(WeeklyReviews::NextSteps).text())
                    .col(ColumnDef::new(WeeklyReviews::AiSummary).text())
                    .col(ColumnDef::new(WeeklyReviews::Trends).text())
                    .col(ColumnDef::new(WeeklyReviews::Insights).text())
                    .col(
                        ColumnDef::new(WeeklyReviews::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(WeeklyReviews::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .table(WeeklyReviews::Table)
                    .name("idx_weekly_reviews_user_week_start")
                    .col(WeeklyReviews::UserId)
                    .col(WeeklyReviews::WeekStartDate)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(WeeklyReviews::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum WeeklyReviews {
    Table,
    Id,
    UserId,
    WeekStartDate,
    WeekEndDate,
    WeekNumber,
    Wins,
    Obstacles,
    Lessons,
    NextSteps,
    AiSummary,
    Trends,
    Insights,
    CreatedAt,
    UpdatedAt,
}
