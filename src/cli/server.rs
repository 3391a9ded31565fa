use anyhow::{Context, Result};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};

use crate::core::config::AppConfig;
use crate::providers::AwesomeApiProvider;
use crate::server::{self, AppState};
use crate::store::SqliteBidStore;

/// Runs the bid server until Ctrl-C.
pub async fn run(config: &AppConfig) -> Result<()> {
    let store = SqliteBidStore::open(&config.server.database_path)?;
    let provider = AwesomeApiProvider::new(config.awesome_api_base_url())?;

    let state = AppState {
        provider: Arc::new(provider),
        store: Arc::new(store),
        api_timeout: config.server.api_timeout(),
        db_timeout: config.server.db_timeout(),
    };

    let listener = TcpListener::bind(&config.server.address)
        .await
        .with_context(|| format!("Failed to bind {}", config.server.address))?;

    server::serve(listener, state, shutdown_signal()).await
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => {
            error!(error = %e, "Failed to listen for shutdown signal");
            std::future::pending::<()>().await;
        }
    }
}
