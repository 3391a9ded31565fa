//! Exchange rate abstractions and the bid wire type

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Body returned by `GET /cotacao` and decoded by the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BidResponse {
    pub bid: String,
}

/// Source of the current USD-BRL bid.
///
/// The bid is passed through as the upstream string, never parsed as a number.
#[async_trait]
pub trait ExchangeRateProvider: Send + Sync {
    /// Fetches the current bid, failing if it cannot be obtained within `deadline`.
    async fn fetch_bid(&self, deadline: Duration) -> Result<String>;
}
