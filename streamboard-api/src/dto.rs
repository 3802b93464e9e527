//! DTOs for API requests and responses.

use serde::{Deserialize, Serialize};

use streamboard_cache::CacheStats;
use streamboard_core::types::StreamView;

/// One stream in the published view model.
#[derive(Debug, Serialize)]
pub struct StreamDto {
    /// Stream contract address (0x-prefixed)
    pub address: String,
    /// Address that created the stream
    pub owner: String,
    /// Address the stream releases tokens to
    pub recipient: String,
    /// Total capacity in whole tokens
    pub cap: f64,
    /// Fill percentage; `null` when unknown (zero-cap stream)
    pub percent: Option<f64>,
}

impl From<StreamView> for StreamDto {
    fn from(view: StreamView) -> Self {
        let percent = view.known_percent();
        Self {
            address: view.address,
            owner: view.owner,
            recipient: view.recipient,
            cap: view.cap,
            percent,
        }
    }
}

/// Response for the stream list.
#[derive(Debug, Serialize)]
pub struct ListStreamsResponse {
    /// Published streams, in indexer order
    pub streams: Vec<StreamDto>,
    /// Number of published streams
    pub total: usize,
    /// Whether the view has reached the readiness threshold
    pub ready: bool,
}

/// Response for a refresh request.
#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    /// False when a newer refresh superseded this one
    pub published: bool,
    /// Number of streams aggregated by this refresh
    pub count: usize,
    /// Readiness flag after this refresh
    pub ready: bool,
}

/// Response for a single stream summary.
#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    /// Stream contract address
    pub address: String,
    /// Total capacity in whole tokens
    pub cap: f64,
    /// Fill percentage; `null` when unknown
    pub percent: Option<f64>,
}

/// Request to build create-stream factory calldata.
#[derive(Debug, Deserialize)]
pub struct CalldataRequest {
    /// Address the stream will release tokens to
    pub recipient: String,
    /// Total capacity as a decimal token amount, e.g. "1.5"
    pub amount: String,
    /// Release frequency in weeks
    pub frequency_weeks: u64,
    /// Whether the stream starts with its full balance available
    #[serde(default)]
    pub start_full: bool,
    /// Address of the streamed ERC-20 token
    pub token: String,
}

/// Response carrying factory calldata for an external wallet to sign.
#[derive(Debug, Serialize)]
pub struct CalldataResponse {
    /// 0x-prefixed ABI-encoded calldata
    pub calldata: String,
    /// Signature of the encoded function
    pub function: String,
}

/// Response for cache statistics.
#[derive(Debug, Serialize)]
pub struct CacheStatsResponse {
    /// Entries currently stored (fresh and stale)
    pub total_entries: usize,
    /// Entries still within the TTL
    pub fresh_entries: usize,
    /// Entries past the TTL, awaiting overwrite
    pub stale_entries: usize,
    /// Configured TTL in milliseconds
    pub ttl_millis: u64,
}

impl From<CacheStats> for CacheStatsResponse {
    fn from(stats: CacheStats) -> Self {
        Self {
            total_entries: stats.total_entries,
            fresh_entries: stats.fresh_entries,
            stale_entries: stats.stale_entries,
            ttl_millis: stats.ttl_millis,
        }
    }
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Always "ok" when the server responds
    pub status: String,
    /// Crate version
    pub version: String,
    /// Seconds since the server started
    pub uptime_seconds: u64,
    /// Number of streams in the published view
    pub streams_published: usize,
    /// Whether the published view is ready
    pub ready: bool,
}
