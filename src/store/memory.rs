use crate::core::{BidRecord, BidStore};
use anyhow::Result;
use async_trait::async_trait;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::debug;

/// In-memory bid store, used where a database file is not wanted.
#[derive(Default)]
pub struct MemoryBidStore {
    rows: Mutex<Vec<BidRecord>>,
}

impl MemoryBidStore {
    /// Creates a new empty MemoryBidStore
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BidStore for MemoryBidStore {
    async fn save_bid(&self, bid: &str, _deadline: Duration) -> Result<i64> {
        let mut rows = self.rows.lock().await;
        let id = rows.last().map_or(1, |r| r.id + 1);
        rows.push(BidRecord {
            id,
            bid: bid.to_string(),
        });
        debug!(id, "Memory PUT for bid");
        Ok(id)
    }

    async fn bids(&self) -> Result<Vec<BidRecord>> {
        Ok(self.rows.lock().await.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_store_assigns_increasing_ids() {
        let store = MemoryBidStore::new();

        assert!(store.bids().await.unwrap().is_empty());

        let first = store.save_bid("5.25", Duration::ZERO).await.unwrap();
        let second = store.save_bid("5.30", Duration::ZERO).await.unwrap();
        assert_eq!(first, 1);
        assert_eq!(second, 2);

        let bids = store.bids().await.unwrap();
        assert_eq!(bids.len(), 2);
        assert_eq!(bids[0].bid, "5.25");
        assert_eq!(bids[1].bid, "5.30");
    }
}
