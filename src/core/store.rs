//! Bid persistence abstractions

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A persisted bid. Rows are append-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BidRecord {
    pub id: i64,
    pub bid: String,
}

#[async_trait]
pub trait BidStore: Send + Sync {
    /// Inserts one row for `bid` and returns its id. Fails if the insert does
    /// not complete within `deadline`.
    async fn save_bid(&self, bid: &str, deadline: Duration) -> Result<i64>;

    /// All stored bids in insertion order.
    async fn bids(&self) -> Result<Vec<BidRecord>>;
}
