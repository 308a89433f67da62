use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(EmailLogs::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(EmailLogs::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(EmailLogs::Email).string_len(255).not_null())
                    .col(ColumnDef::new(EmailLogs::UserId).uuid())
                    .col(ColumnDef::new(EmailLogs::EmailType).string_len(50).not_null())
                    .col(ColumnDef::new(EmailLogs::Subject).text().not_null())
                    .col(ColumnDef::new(EmailLogs::Status).string_len(20).not_null())
                    .col(ColumnDef::new(EmailLogs::ErrorMessage).text())
                    .col(
                        ColumnDef::new(EmailLogs::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // 管理画面の一覧は作成日の降順
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .table(EmailLogs::Table)
                    .name("idx_email_logs_created_at")
                    .col(EmailLogs::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .table(EmailLogs::Table)
                    .name("idx_email_logs_type_status")
                    .col(EmailLogs::EmailType)
                    .col(EmailLogs::Status)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(EmailLogs::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum EmailLogs {
    Table,
    Id,
    Email,
    UserId,
    EmailType,
    Subject,
    Status,
    ErrorMessage,
    CreatedAt,
}
