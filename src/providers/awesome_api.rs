use anyhow::{Result, anyhow};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument};

use crate::core::ExchangeRateProvider;

const USD_BRL_ENDPOINT: &str = "/json/last/USD-BRL";

// AwesomeApiProvider implementation for ExchangeRateProvider
pub struct AwesomeApiProvider {
    base_url: String,
    client: reqwest::Client,
}

impl AwesomeApiProvider {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("cotacao/1.0")
            .build()?;
        Ok(AwesomeApiProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }
}

#[derive(Debug, Deserialize)]
struct CurrentExchangeRate {
    #[serde(rename = "USDBRL")]
    usd_brl: UsdBrl,
}

#[allow(dead_code)]
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct UsdBrl {
    code: String,
    codein: String,
    name: String,
    high: String,
    low: String,
    #[serde(rename = "varBid")]
    var_bid: String,
    #[serde(rename = "pctChange")]
    pct_change: String,
    bid: String,
    ask: String,
    timestamp: String,
    create_date: String,
}

#[async_trait]
impl ExchangeRateProvider for AwesomeApiProvider {
    #[instrument(name = "AwesomeApiFetch", skip(self), fields(base_url = %self.base_url))]
    async fn fetch_bid(&self, deadline: Duration) -> Result<String> {
        let url = format!("{}{}", self.base_url, USD_BRL_ENDPOINT);
        debug!("Requesting exchange rate from {}", url);

        let response = self
            .client
            .get(&url)
            .timeout(deadline)
            .send()
            .await
            .map_err(|e| anyhow!("Request error: {} for URL: {}", e, url))?;

        if !response.status().is_success() {
            return Err(anyhow!(
                "HTTP error: {} for currency pair: USD-BRL",
                response.status()
            ));
        }

        // The body read is still bounded by the request timeout.
        let text = response
            .text()
            .await
            .map_err(|e| anyhow!("Failed to read response body from {}: {}", url, e))?;

        let data: CurrentExchangeRate = serde_json::from_str(&text)
            .map_err(|e| anyhow!("Failed to parse JSON response for USD-BRL: {}", e))?;

        debug!(quote = ?data.usd_brl, "Received upstream quote");
        Ok(data.usd_brl.bid)
    }
}
