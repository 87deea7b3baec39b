//! Search Analytics API Server
//!
//! Run with: cargo run --bin search-analytics
//!
//! # Configuration
//!
//! Config file (first found): `--config <path>`,
//! `$XDG_CONFIG_HOME/search-analytics/config.toml`,
//! `/etc/search-analytics/config.toml`, `./config.toml`.
//!
//! Environment variables override the file:
//! - `SEARCH_ANALYTICS_DATA_DIR`: Data directory (default: ./data)
//! - `SEARCH_ANALYTICS_MAX_EVENTS`: Retention bound (default: 1000)
//! - `SEARCH_ANALYTICS_HOST` / `SEARCH_ANALYTICS_PORT`: Bind address (default: 0.0.0.0:8000)
//! - `SEARCH_ANALYTICS_LOG_LEVEL` / `SEARCH_ANALYTICS_LOG_FORMAT`: Logging
//! - `RUST_LOG`: Overrides the configured log level

use clap::Parser;
use search_analytics::api::{serve, AppState};
use search_analytics::config::{Config, LoggingConfig};
use search_analytics::storage::JsonFileStore;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "search-analytics")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Search event analytics server")]
struct Args {
    /// Path to a TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };

    init_tracing(&config.logging);

    tracing::info!("Starting search analytics server v{}", env!("CARGO_PKG_VERSION"));

    let log_path = config.storage.log_path();
    tracing::info!("Event log: {:?}", log_path);
    tracing::info!("Retention: {} events", config.storage.max_events);

    let store = Arc::new(JsonFileStore::new(log_path));
    let state = AppState::new(store, &config);

    serve(state, &config.api).await?;

    tracing::info!("Search analytics server stopped");
    Ok(())
}

/// Install the global subscriber. `RUST_LOG` wins over the configured level.
fn init_tracing(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("search_analytics={},tower_http=debug", logging.level).into()
    });

    let registry = tracing_subscriber::registry().with(filter);

    if logging.is_json() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}
