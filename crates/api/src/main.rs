//! Delay API - flight delay prediction service
//!
//! Fits the shared classifier from the historical dataset at start-up,
//! then serves predictions over HTTP.

use anyhow::{Context, Result};
use delay_api::{api, config};
use delay_lib::{
    features::CATALOGUE_VERSION, CsvSource, ModelManager, ServiceMetrics, StructuredLogger,
};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const SERVICE_VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing with JSON output and env filter
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer().json())
        .init();

    info!("Starting delay-api");

    let config = config::ServiceConfig::load().context("Failed to load configuration")?;
    info!(repo_root = %config.repo_root.display(), port = config.api_port, "Service configured");

    let logger = StructuredLogger::new("delay-api");
    logger.log_startup(SERVICE_VERSION, CATALOGUE_VERSION);

    let metrics = ServiceMetrics::new();
    let models = Arc::new(ModelManager::new(CsvSource::from_root(&config.repo_root)));

    // Warm-up: the model must be fitted before any request is accepted
    let warmup = Arc::clone(&models);
    tokio::task::spawn_blocking(move || warmup.initialize())
        .await
        .context("Model initialization task panicked")?
        .context("Model initialization failed")?;

    let app_state = Arc::new(api::AppState::new(models, metrics, logger.clone()));

    tokio::select! {
        result = api::serve(config.api_port, app_state) => result?,
        signal = tokio::signal::ctrl_c() => {
            signal?;
            logger.log_shutdown("SIGINT received");
        }
    }

    info!("Shutting down");
    Ok(())
}
