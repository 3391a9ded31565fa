//! Client side: ask the server for the bid and record it to a file.

use anyhow::{Context, Result, anyhow};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

use crate::core::BidResponse;
use crate::server::BID_ROUTE;

/// Fetches the current bid from a running server within `deadline`.
pub async fn fetch_bid(server_url: &str, deadline: Duration) -> Result<String> {
    let url = format!("{}{}", server_url.trim_end_matches('/'), BID_ROUTE);
    debug!("Requesting bid from {}", url);

    let client = reqwest::Client::builder()
        .user_agent("cotacao/1.0")
        .timeout(deadline)
        .build()?;

    let response = client
        .get(&url)
        .send()
        .await
        .with_context(|| format!("Error fetching exchange rate from {url}"))?;

    if !response.status().is_success() {
        return Err(anyhow!(
            "Server responded with status: {}",
            response.status()
        ));
    }

    let body = response
        .json::<BidResponse>()
        .await
        .context("Error decoding exchange rate")?;
    Ok(body.bid)
}

pub fn bid_line(bid: &str) -> String {
    format!("Dólar: {bid}")
}

/// Writes `Dólar: <bid>` to `path`, replacing any previous content.
pub fn write_bid_file<P: AsRef<Path>>(path: P, bid: &str) -> Result<()> {
    let path = path.as_ref();
    std::fs::write(path, bid_line(bid))
        .with_context(|| format!("Error writing to file: {}", path.display()))?;
    info!("Bid saved to `{}`", path.display());
    Ok(())
}
