//! TTL cache for Streamboard stream summaries.
//!
//! In-memory cache keyed by stream contract address, with lazy time-based
//! expiration and no capacity eviction.

mod cache;

pub use cache::{CacheConfig, CacheStats, SummaryCache};
