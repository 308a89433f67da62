use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Goals::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Goals::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Goals::UserId).uuid().not_null())
                    .col(ColumnDef::new(Goals::Title).text().not_null())
                    .col(ColumnDef::new(Goals::Description).text())
                    .col(ColumnDef::new(Goals::Why).text())
                    .col(ColumnDef::new(Goals::How).text())
                    .col(
                        ColumnDef::new(Goals::Type)
                            .string_len(20)
                            .not_null()
                            .default("short"),
                    )
                    .col(ColumnDef::new(Goals::Category).text())
                    .col(ColumnDef::new(Goals::Timeline).text())
                    .col(ColumnDef::new(Goals::Reward).text())
                    .col(
                        ColumnDef::new(Goals::Progress)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Goals::Status)
                            .string_len(20)
                            .not_null()
                            .default("active"),
                    )
                    .col(
                        ColumnDef::new(Goals::Milestones)
                            .json_binary()
                            .not_null()
                            .default(Expr::cust("'[]'::jsonb")),
                    )
                    .col(ColumnDef::new(Goals::EntryDate).date().not_null())
                    .col(ColumnDef::new(Goals::EmpireVision).text())
                    .col(ColumnDef::new(Goals::FinancialFreedomNumber).text())
                    .col(ColumnDef::new(Goals::LegacyImpact).text())
                    .col(ColumnDef::new(Goals::LegacyGoals).text())
                    .col(ColumnDef::new(Goals::VisionGoals).text())
                    .col(ColumnDef::new(Goals::StrategicGoals).text())
                    .col(
                        ColumnDef::new(Goals::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Goals::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // リマインダーでアクティブな目標を引くためのインデックス
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .table(Goals::Table)
                    .name("idx_goals_user_status")
                    .col(Goals::UserId)
                    .col(Goals::Status)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Goals::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Goals {
    Table,
    Id,
    UserId,
    Title,
    Description,
    Why,
    How,
    Type,
    Category,
    Timeline,
    Reward,
    Progress,
    Status,
    Milestones,
    EntryDate,
    EmpireVision,
    FinancialFreedomNumber,
    LegacyImpact,
    LegacyGoals,
    VisionGoals,
    StrategicGoals,
    CreatedAt,
    UpdatedAt,
}
