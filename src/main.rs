use std::sync::Arc;

use earnings_engine::api::{AppState, create_router};
use earnings_engine::config::ConfigLoader;
use earnings_engine::store::MemoryStore;
use earnings_engine::telemetry::init_tracing;
use tracing::{error, info};

const CONFIG_DIR_ENV: &str = "EARNINGS_CONFIG_DIR";
const DEFAULT_CONFIG_DIR: &str = "./config/default";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let config_dir = std::env::var(CONFIG_DIR_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_DIR.to_string());
    let config = ConfigLoader::load(&config_dir).inspect_err(|err| {
        error!(config_dir = %config_dir, error = %err, "Failed to load configuration");
    })?;

    let bind_address = config.server().bind_address.clone();
    let state = AppState::new(config, Arc::new(MemoryStore::new()));
    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    info!(bind_address = %bind_address, config_dir = %config_dir, "Earnings engine listening");

    axum::serve(listener, router).await?;
    Ok(())
}
