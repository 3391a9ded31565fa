pub mod memory;
pub mod sqlite;

pub use memory::MemoryBidStore;
pub use sqlite::SqliteBidStore;
