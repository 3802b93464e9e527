//! App state: config, indexer, and the shared loader.

use std::sync::Arc;
use std::time::Instant;

use streamboard_cache::{CacheConfig, SummaryCache};
use streamboard_chain::{ChainConfig, RpcStreamReader};
use streamboard_core::constants::{
    DEFAULT_ETH_RPC_URL, DEFAULT_READY_THRESHOLD, DEFAULT_SUBGRAPH_ENDPOINT, ETH_RPC_URL_ENV,
    READY_THRESHOLD_ENV, SUBGRAPH_ENDPOINT_ENV,
};
use streamboard_core::traits::{StreamIndex, StreamReader};
use streamboard_indexer::{SubgraphClient, SubgraphConfig};
use streamboard_loader::{LoaderConfig, StreamLoader, SummaryResolver};

/// API server configuration.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    /// Ethereum RPC URL for stream contract reads.
    pub rpc_url: String,
    /// GraphQL endpoint of the factory subgraph.
    pub subgraph_endpoint: String,
    /// Minimum published list length before the view is ready.
    pub ready_threshold: usize,
    /// Summary cache configuration.
    pub cache: CacheConfig,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            rpc_url: DEFAULT_ETH_RPC_URL.into(),
            subgraph_endpoint: DEFAULT_SUBGRAPH_ENDPOINT.into(),
            ready_threshold: DEFAULT_READY_THRESHOLD,
            cache: CacheConfig::default(),
        }
    }
}

impl ApiConfig {
    /// Loads configuration from the environment (and `.env` if present).
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();

        Self {
            rpc_url: std::env::var(ETH_RPC_URL_ENV)
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_ETH_RPC_URL.into()),
            subgraph_endpoint: std::env::var(SUBGRAPH_ENDPOINT_ENV)
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_SUBGRAPH_ENDPOINT.into()),
            ready_threshold: std::env::var(READY_THRESHOLD_ENV)
                .ok()
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(DEFAULT_READY_THRESHOLD),
            cache: CacheConfig::from_env(),
        }
    }
}

/// Shared state behind every handler.
pub struct AppState {
    /// Server configuration.
    pub config: ApiConfig,
    /// Source of stream references.
    pub index: Arc<dyn StreamIndex>,
    /// Aggregator publishing the view model.
    pub loader: StreamLoader,
    /// Server start time, for uptime reporting.
    pub started_at: Instant,
}

impl AppState {
    /// Builds state with the production reader and indexer.
    pub fn new(config: ApiConfig) -> Self {
        let reader: Arc<dyn StreamReader> = Arc::new(RpcStreamReader::with_config(
            ChainConfig::new(config.rpc_url.clone()),
        ));
        let index: Arc<dyn StreamIndex> = Arc::new(SubgraphClient::with_config(
            SubgraphConfig::new(config.subgraph_endpoint.clone()),
        ));
        Self::with_parts(config, reader, index)
    }

    /// Builds state around injected reader and index implementations.
    pub fn with_parts(
        config: ApiConfig,
        reader: Arc<dyn StreamReader>,
        index: Arc<dyn StreamIndex>,
    ) -> Self {
        let cache = Arc::new(SummaryCache::with_config(config.cache.clone()));
        let resolver = SummaryResolver::new(reader, cache);
        let loader = StreamLoader::new(
            resolver,
            LoaderConfig::new().ready_threshold(config.ready_threshold),
        );

        Self {
            config,
            index,
            loader,
            started_at: Instant::now(),
        }
    }
}
