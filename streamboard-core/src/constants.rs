//! Protocol constants and configuration defaults.

/// Number of decimals the streamed token uses (standard 18-decimal ERC-20).
pub const TOKEN_DECIMALS: u32 = 18;

/// Divisor converting raw token units to whole tokens (10^18).
pub const TOKEN_UNIT: f64 = 1e18;

/// Raw units per whole token, as an integer (10^18).
pub const RAW_PER_TOKEN: u128 = 1_000_000_000_000_000_000;

/// Default summary cache TTL in milliseconds (12 hours).
pub const DEFAULT_CACHE_TTL_MILLIS: u64 = 43_200_000;

/// Environment variable overriding the summary cache TTL, in milliseconds.
pub const CACHE_TTL_ENV: &str = "STREAM_CACHE_TTL_MILLIS";

/// Default number of resolved streams required before the view is marked ready.
pub const DEFAULT_READY_THRESHOLD: usize = 18;

/// Environment variable overriding the readiness threshold.
pub const READY_THRESHOLD_ENV: &str = "STREAM_READY_THRESHOLD";

/// Seconds in one week, the frequency unit of `createStreamFor`.
pub const SECONDS_PER_WEEK: u64 = 604_800;

/// Environment variable overriding the Ethereum JSON-RPC endpoint.
pub const ETH_RPC_URL_ENV: &str = "ETH_RPC_URL";

/// Default Ethereum JSON-RPC endpoint when none is configured.
pub const DEFAULT_ETH_RPC_URL: &str = "https://ethereum.publicnode.com";

/// Environment variable overriding the subgraph endpoint.
pub const SUBGRAPH_ENDPOINT_ENV: &str = "SUBGRAPH_ENDPOINT";

/// Default subgraph endpoint when none is configured.
pub const DEFAULT_SUBGRAPH_ENDPOINT: &str =
    "http://localhost:8000/subgraphs/name/tokenstreams/org-factory";
