mod app;

use anyhow::{Context, Result};
use std::fs::{self, OpenOptions};

use cookie_kingdom_core::{
    config::{self, AppConfig},
    GameSession,
};
use tracing_subscriber::{prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    init_logging()?;

    let config_path = config::ensure_default_config()?;
    let config = AppConfig::load_from(&config_path)
        .with_context(|| format!("failed to load {}", config_path.display()))?;
    tracing::info!(
        path = %config_path.display(),
        upgrade_cost = config.economy.upgrade_cost,
        "Configuration loaded"
    );

    let session = GameSession::new(&config);
    let mut app = app::KingdomApp::new(session, &config.ui);
    app.run().await
}

fn init_logging() -> Result<()> {
    let log_dir = std::env::current_dir()?.join("logs");
    fs::create_dir_all(&log_dir)?;
    let log_path = log_dir.join("cookie-kingdom.log");
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("failed to open {}", log_path.display()))?;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // The terminal UI owns stdout, so logs only go to the file.
    let file_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_ansi(false)
        .compact()
        .with_writer(std::sync::Mutex::new(log_file));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .init();

    Ok(())
}
