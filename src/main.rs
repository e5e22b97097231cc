//! Process bootstrap: logging, configuration, provider wiring, server.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use vibe_planner::api::AppState;
use vibe_planner::{PlannerConfig, VibePlanner, web};

#[tokio::main]
async fn main() -> Result<()> {
    let config = PlannerConfig::load().context("Failed to load configuration")?;

    // RUST_LOG wins over the configured level when set
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));
    if config.logging.format == "json" {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    info!("Starting vibe-planner {}", vibe_planner::VERSION);

    let planner =
        Arc::new(VibePlanner::from_config(&config).context("Failed to build provider clients")?);
    let state = AppState::new(planner, config.auth.clone());

    web::run(&config.server, state).await
}
