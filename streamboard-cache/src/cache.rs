//! In-memory TTL cache for stream summaries.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use streamboard_core::constants::{CACHE_TTL_ENV, DEFAULT_CACHE_TTL_MILLIS};
use streamboard_core::types::StreamSummary;

/// Cache entry with its creation time.
#[derive(Clone)]
struct CacheEntry {
    summary: StreamSummary,
    inserted_at: Instant,
}

impl CacheEntry {
    /// An entry is fresh strictly for the TTL after creation.
    fn is_fresh(&self, ttl: Duration) -> bool {
        self.inserted_at.elapsed() < ttl
    }
}

/// Cache configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CacheConfig {
    /// TTL in milliseconds after which an entry is stale.
    pub ttl_millis: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_millis: DEFAULT_CACHE_TTL_MILLIS,
        }
    }
}

impl CacheConfig {
    /// Creates a configuration with the given TTL.
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl_millis: ttl.as_millis() as u64,
        }
    }

    /// Reads the TTL from `STREAM_CACHE_TTL_MILLIS`.
    ///
    /// Falls back to the 12-hour default when the variable is unset or
    /// not a number.
    pub fn from_env() -> Self {
        Self::from_env_value(std::env::var(CACHE_TTL_ENV).ok().as_deref())
    }

    fn from_env_value(raw: Option<&str>) -> Self {
        let ttl_millis = raw
            .and_then(|value| value.trim().parse::<u64>().ok())
            .unwrap_or(DEFAULT_CACHE_TTL_MILLIS);
        Self { ttl_millis }
    }

    /// The TTL as a [`Duration`].
    pub fn ttl(&self) -> Duration {
        Duration::from_millis(self.ttl_millis)
    }
}

/// In-memory cache of per-stream summaries.
///
/// Keyed by stream contract address. Unbounded: entries go stale after the
/// TTL but are only superseded by later inserts, never removed. Staleness is
/// evaluated lazily at read time; there is no background eviction.
///
/// Thread-safe; shared behind an `Arc` between the resolver and the API.
/// No lock is held across an await point.
pub struct SummaryCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
    config: CacheConfig,
}

impl SummaryCache {
    /// Creates a cache with the default 12-hour TTL.
    pub fn new() -> Self {
        Self::with_config(CacheConfig::default())
    }

    /// Creates a cache with custom configuration.
    pub fn with_config(config: CacheConfig) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            config,
        }
    }

    /// Returns the cached summary for `address` iff a fresh entry exists.
    ///
    /// No side effects: stale entries are left in place until overwritten.
    pub fn get(&self, address: &str) -> Option<StreamSummary> {
        let normalized = Self::normalize(address);
        let entries = self.entries.read();
        entries
            .get(&normalized)
            .filter(|e| e.is_fresh(self.config.ttl()))
            .map(|e| e.summary)
    }

    /// Inserts or overwrites the entry for `address` with a fresh timestamp.
    ///
    /// Unconditional; last writer wins.
    pub fn insert(&self, address: &str, summary: StreamSummary) {
        let normalized = Self::normalize(address);
        self.entries.write().insert(
            normalized,
            CacheEntry {
                summary,
                inserted_at: Instant::now(),
            },
        );
    }

    /// Returns the number of entries, fresh and stale.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns true if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Returns cache statistics.
    pub fn stats(&self) -> CacheStats {
        let ttl = self.config.ttl();
        let entries = self.entries.read();
        let fresh = entries.values().filter(|e| e.is_fresh(ttl)).count();
        CacheStats {
            total_entries: entries.len(),
            fresh_entries: fresh,
            stale_entries: entries.len().saturating_sub(fresh),
            ttl_millis: self.config.ttl_millis,
        }
    }

    /// Addresses are case-insensitive hex; index them lowercased.
    fn normalize(address: &str) -> String {
        address.trim().to_lowercase()
    }
}

impl Default for SummaryCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Cache statistics.
#[derive(Clone, Debug, Serialize)]
pub struct CacheStats {
    /// Entries currently stored (fresh and stale).
    pub total_entries: usize,
    /// Entries still within the TTL.
    pub fresh_entries: usize,
    /// Entries past the TTL, awaiting overwrite.
    pub stale_entries: usize,
    /// Configured TTL in milliseconds.
    pub ttl_millis: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    const ADDR: &str = "0x1111111111111111111111111111111111111111";

    fn summary(cap: f64, percent: f64) -> StreamSummary {
        StreamSummary { cap, percent }
    }

    #[test]
    fn test_insert_get() {
        let cache = SummaryCache::new();
        cache.insert(ADDR, summary(10.0, 25.0));

        let hit = cache.get(ADDR).unwrap();
        assert_eq!(hit.cap, 10.0);
        assert_eq!(hit.percent, 25.0);
    }

    #[test]
    fn test_miss() {
        let cache = SummaryCache::new();
        assert!(cache.get(ADDR).is_none());
    }

    #[test]
    fn test_normalizes_address_case() {
        let cache = SummaryCache::new();
        cache.insert("0xABCDEF1234567890ABCDEF1234567890ABCDEF12", summary(1.0, 1.0));
        assert!(cache
            .get("0xabcdef1234567890abcdef1234567890abcdef12")
            .is_some());
        assert!(cache
            .get("  0xAbCdEf1234567890aBcDeF1234567890abCDef12  ")
            .is_some());
    }

    #[test]
    fn test_stale_entry_misses_but_stays() {
        let cache = SummaryCache::with_config(CacheConfig::new(Duration::from_millis(1)));
        cache.insert(ADDR, summary(10.0, 25.0));
        std::thread::sleep(Duration::from_millis(10));

        assert!(cache.get(ADDR).is_none());
        // stale, not removed
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.stats().stale_entries, 1);
    }

    #[test]
    fn test_overwrite_refreshes_timestamp() {
        let cache = SummaryCache::with_config(CacheConfig::new(Duration::from_millis(30)));
        cache.insert(ADDR, summary(10.0, 25.0));
        std::thread::sleep(Duration::from_millis(40));
        assert!(cache.get(ADDR).is_none());

        cache.insert(ADDR, summary(10.0, 30.0));
        let hit = cache.get(ADDR).unwrap();
        assert_eq!(hit.percent, 30.0);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_stats() {
        let cache = SummaryCache::new();
        cache.insert(ADDR, summary(10.0, 25.0));
        cache.insert("0x2222222222222222222222222222222222222222", summary(5.0, 50.0));

        let stats = cache.stats();
        assert_eq!(stats.total_entries, 2);
        assert_eq!(stats.fresh_entries, 2);
        assert_eq!(stats.stale_entries, 0);
        assert_eq!(stats.ttl_millis, DEFAULT_CACHE_TTL_MILLIS);
    }

    #[test]
    fn test_config_from_env_value() {
        assert_eq!(
            CacheConfig::from_env_value(None).ttl_millis,
            DEFAULT_CACHE_TTL_MILLIS
        );
        assert_eq!(
            CacheConfig::from_env_value(Some("not-a-number")).ttl_millis,
            DEFAULT_CACHE_TTL_MILLIS
        );
        assert_eq!(
            CacheConfig::from_env_value(Some("")).ttl_millis,
            DEFAULT_CACHE_TTL_MILLIS
        );
        assert_eq!(CacheConfig::from_env_value(Some("60000")).ttl_millis, 60000);
        assert_eq!(
            CacheConfig::from_env_value(Some(" 1500 ")).ttl_millis,
            1500
        );
    }
}
