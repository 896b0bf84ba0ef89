use anyhow::{Context, Result};
use community::{config::Config, handler::AppRouter, state::AppState};
use dotenv::dotenv;
use shared::utils::{init_logger, run_metrics_collector};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    let config = Config::init().context("Failed to load configuration")?;

    init_logger("community", config.is_dev, config.enable_file_log);

    info!("Starting community service initialization...");

    let state = AppState::new(&config)
        .await
        .context("Failed to create AppState")?;

    tokio::spawn(run_metrics_collector(state.system_metrics.clone()));

    AppRouter::serve(config.port, state)
        .await
        .context("Failed to start server")?;

    info!("Shutting down servers...");

    Ok(())
}
