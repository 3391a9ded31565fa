use anyhow::Result;
use tracing::info;

use crate::cli::ui::{StyleType, style_text};
use crate::client;
use crate::core::config::ClientConfig;

/// Fetches the bid from the server, prints it and records it to the output
/// file. Nothing is written unless the fetch succeeds.
pub async fn run(config: &ClientConfig) -> Result<()> {
    let bid = client::fetch_bid(&config.server_url, config.timeout()).await?;
    info!(%bid, "Current bid");

    println!(
        "{} {}",
        style_text("Dólar:", StyleType::Label),
        style_text(&bid, StyleType::Value)
    );

    client::write_bid_file(&config.output_path, &bid)
}
