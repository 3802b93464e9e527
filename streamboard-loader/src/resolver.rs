//! Per-stream summary resolution.

use std::sync::Arc;

use tracing::{debug, instrument};

use streamboard_cache::SummaryCache;
use streamboard_core::error::Result;
use streamboard_core::traits::StreamReader;
use streamboard_core::types::StreamSummary;

/// Resolves one stream's summary, memoized through the TTL cache.
///
/// Cheap to clone; clones share the same reader and cache.
#[derive(Clone)]
pub struct SummaryResolver {
    reader: Arc<dyn StreamReader>,
    cache: Arc<SummaryCache>,
}

impl SummaryResolver {
    /// Creates a resolver over the given reader and cache.
    pub fn new(reader: Arc<dyn StreamReader>, cache: Arc<SummaryCache>) -> Self {
        Self { reader, cache }
    }

    /// The shared cache, for stats reporting.
    pub fn cache(&self) -> &Arc<SummaryCache> {
        &self.cache
    }

    /// Returns the summary for `address`, from cache when fresh.
    ///
    /// On a miss or stale entry the cap is read first; the balance read
    /// starts only once the cap read has resolved. Either read failing
    /// propagates unrecovered: no retry, nothing cached.
    #[instrument(skip(self))]
    pub async fn resolve(&self, address: &str) -> Result<StreamSummary> {
        if let Some(summary) = self.cache.get(address) {
            debug!(address, "Summary cache hit");
            return Ok(summary);
        }

        let cap_raw = self.reader.cap(address).await?;
        let balance_raw = self.reader.stream_balance(address).await?;

        let summary = StreamSummary::from_raw(cap_raw, balance_raw);
        self.cache.insert(address, summary);

        debug!(address, cap = summary.cap, "Resolved stream summary");
        Ok(summary)
    }
}
