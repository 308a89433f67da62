// 各テーブルの件数を表示して、マイグレーションが適用済みかを確認する
use journal_backend::config::AppConfig;
use journal_backend::db::create_db_pool;
use journal_backend::domain::{
    email_log_model, foundation_model, goal_model, journal_entry_model, order_confirmation_model,
    verification_code_model, weekly_review_model,
};
use sea_orm::{DatabaseConnection, DbErr, EntityTrait, PaginatorTrait};

async fn count<E: EntityTrait>(db: &DatabaseConnection) -> Result<u64, DbErr>
where
    E::Model: Sync,
{
    E::find().count(db).await
}

fn report(table: &str, result: Result<u64, DbErr>) -> bool {
    match result {
        Ok(rows) => {
            println!("  {:<22} {:>8} rows", table, rows);
            true
        }
        Err(e) => {
            println!("  {:<22} ERROR: {}", table, e);
            false
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env()?;
    let db = create_db_pool(&config).await?;

    println!("=== Table check ===");
    let results = [
        report(
            "journal_entries",
            count::<journal_entry_model::Entity>(&db).await,
        ),
        report("goals", count::<goal_model::Entity>(&db).await),
        report("foundation", count::<foundation_model::Entity>(&db).await),
        report(
            "weekly_reviews",
            count::<weekly_review_model::Entity>(&db).await,
        ),
        report("email_logs", count::<email_log_model::Entity>(&db).await),
        report(
            "verification_codes",
            count::<verification_code_model::Entity>(&db).await,
        ),
        report(
            "order_confirmations",
            count::<order_confirmation_model::Entity>(&db).await,
        ),
    ];

    let missing = results.iter().filter(|ok| !**ok).count();
    if missing > 0 {
        println!("\n{} table(s) could not be read. Run the migrations first.", missing);
        std::process::exit(1);
    }

    println!("\nAll tables are available.");
    Ok(())
}
