//! Run with: cargo run --bin process_deletions

use secretshare::config::{self, database::DatabaseConfig};
use secretshare::services::{processor::DeletionProcessor, store::MongoStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    config::logging::init();

    let settings = DatabaseConfig::from_env()?;

    println!("Connecting to MongoDB...");
    let db = config::database::connect(&settings).await?;

    let processor = DeletionProcessor::new(MongoStore::new(&db));
    let report = processor.run().await?;

    if report.is_noop() {
        println!("\n✓ No pending deletions");
    } else {
        println!(
            "\n✓ Processed {} deletions: {} shares removed from {} users ({}ms)",
            report.deletions_processed, report.shares_removed, report.users_updated, report.elapsed_ms()
        );
    }
    Ok(())
}
