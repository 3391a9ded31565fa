pub mod cli;
pub mod client;
pub mod core;
pub mod providers;
pub mod server;
pub mod store;

use anyhow::Result;
use tracing::{debug, info};

use crate::core::config::AppConfig;

pub enum AppCommand {
    Server,
    Client,
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("Cotacao starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    match command {
        AppCommand::Server => cli::server::run(&config).await,
        AppCommand::Client => cli::client::run(&config.client).await,
    }
}
