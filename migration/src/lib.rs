// migration/src/lib.rs
pub use sea_orm_migration::prelude::*;

// ジャーナル関連マイグレーション
mod m20251001_000001_create_journal_entries_table;
mod m20251001_000002_create_goals_table;
mod m20251001_000003_create_foundation_table;
mod m20251001_000004_create_weekly_reviews_table;

// メール・認証コード関連マイグレーション
mod m20251001_000005_create_email_logs_table;
mod m20251001_000006_create_verification_codes_table;

// 注文確認メールの冪等性レコード
mod m20251001_000007_create_order_confirmations_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            // 1. ユーザーごとのジャーナルデータ（Supabase Auth のユーザーIDを参照）
            Box::new(m20251001_000001_create_journal_entries_table::Migration),
            Box::new(m20251001_000002_create_goals_table::Migration),
            Box::new(m20251001_000003_create_foundation_table::Migration),
            Box::new(m20251001_000004_create_weekly_reviews_table::Migration),
            // 2. メール送信ログと認証コード
            Box::new(m20251001_000005_create_email_logs_table::Migration),
            Box::new(m20251001_000006_create_verification_codes_table::Migration),
            // 3. 注文確認
            Box::new(m20251001_000007_create_order_confirmations_table::Migration),
        ]
    }
}
