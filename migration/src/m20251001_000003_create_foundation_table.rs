use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Foundation::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Foundation::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Foundation::UserId).uuid().not_null())
                    .col(ColumnDef::new(Foundation::EntryDate).date().not_null())
                    .col(ColumnDef::new(Foundation::MyWhy).text())
                    .col(ColumnDef::new(Foundation::WhatDrivesMe).text())
                    .col(ColumnDef::new(Foundation::WhatImDoneWith).text())
                    .col(ColumnDef::new(Foundation::WhoImBuildingFor).text())
                    .col(ColumnDef::new(Foundation::MyVision).text())
                    .col(ColumnDef::new(Foundation::MyValues).text())
                    .col(ColumnDef::new(Foundation::MySkills).text())
                    .col(ColumnDef::new(Foundation::Influences).text())
                    .col(ColumnDef::new(Foundation::BooksThatShapedMe).text())
                    .col(ColumnDef::new(Foundation::MentorsRoleModels).text())
                    .col(ColumnDef::new(Foundation::CorePrinciples).text())
                    .col(ColumnDef::new(Foundation::LessonsLearned).text())
                    .col(ColumnDef::new(Foundation::AccountabilityPartner).text())
                    .col(
                        ColumnDef::new(Foundation::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Foundation::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // 同じ日に複数エントリを許可するためユニーク制約は付けない
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .table(Foundation::Table)
                    .name("idx_foundation_user_date")
                    .col(Foundation::UserId)
                    .col(Foundation::EntryDate)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Foundation::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Foundation {
    Table,
    Id,
    UserId,
    EntryDate,
    MyWhy,
    WhatDrivesMe,
    WhatImDoneWith,
    WhoImBuildingFor,
    MyVision,
    MyValues,
    MySkills,
    Influences,
    BooksThatShapedMe,
    MentorsRoleModels,
    CorePrinciples,
    LessonsLearned,
    AccountabilityPartner,
    CreatedAt,
    UpdatedAt,
}
