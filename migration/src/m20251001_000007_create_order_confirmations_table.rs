use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Stripe セッションIDごとに確認メールの送信状態を1行で管理する
        manager
            .create_table(
                Table::create()
                    .table(OrderConfirmations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(OrderConfirmations::SessionId)
                            .string_len(255)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(OrderConfirmations::Status)
                            .string_len(20)
                            .not_null()
                            .default("pending"),
                    )
                    .col(
                        ColumnDef::new(OrderConfirmations::ConfirmedBy)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(OrderConfirmations::Attempts)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .col(ColumnDef::new(OrderConfirmations::CustomerEmail).string_len(255))
                    .col(ColumnDef::new(OrderConfirmations::LastError).text())
                    .col(
                        ColumnDef::new(OrderConfirmations::ClaimedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(OrderConfirmations::SentAt).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(OrderConfirmations::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(OrderConfirmations::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(OrderConfirmations::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum OrderConfirmations {
    Table,
    SessionId,
    Status,
    ConfirmedBy,
    Attempts,
    CustomerEmail,
    LastError,
    ClaimedAt,
    SentAt,
    CreatedAt,
    UpdatedAt,
}
