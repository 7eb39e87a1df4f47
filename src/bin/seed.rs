// region:    --- Imports
use auction_house::config::Config;
use auction_house::database::seed::seed_demo_data;
use auction_house::database::DatabaseManager;
use tracing::info;
// endregion: --- Imports

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .without_time()
        .with_target(false)
        .init();

    let config = Config::from_env()?;
    let db_manager = DatabaseManager::new(&config).await?;
    db_manager.initialize_database(config.reset_database).await?;

    match seed_demo_data(&db_manager).await? {
        Some(report) => info!("{:<12} --> 완료: {:?}", "Seed", report),
        None => info!("{:<12} --> 변경 없음", "Seed"),
    }
    Ok(())
}
