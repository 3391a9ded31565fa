//! Core business logic abstractions

pub mod config;
pub mod log;
pub mod rate;
pub mod store;

// Re-export main types for cleaner imports
pub use rate::{BidResponse, ExchangeRateProvider};
pub use store::{BidRecord, BidStore};
