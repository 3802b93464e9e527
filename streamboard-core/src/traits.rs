//! Common traits for Streamboard.
//!
//! These traits define the interfaces that different implementations can satisfy,
//! enabling modularity and testing.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::StreamReference;

// ═══════════════════════════════════════════════════════════════════════════════
// STREAM READER TRAIT
// ═══════════════════════════════════════════════════════════════════════════════

/// Read-only access to a stream contract's state.
///
/// Amounts are raw integers in the smallest token unit (18 decimals).
///
/// Implementations might use:
/// - Ethereum JSON-RPC `eth_call` (production)
/// - In-memory fixtures (testing)
#[async_trait]
pub trait StreamReader: Send + Sync {
    /// Reads the stream's total capacity.
    async fn cap(&self, address: &str) -> Result<u128>;

    /// Reads the stream's current balance.
    async fn stream_balance(&self, address: &str) -> Result<u128>;
}

// ═══════════════════════════════════════════════════════════════════════════════
// STREAM INDEX TRAIT
// ═══════════════════════════════════════════════════════════════════════════════

/// Source of the set of known stream references.
///
/// The production implementation queries the factory's subgraph; tests use
/// fixed in-memory lists.
#[async_trait]
pub trait StreamIndex: Send + Sync {
    /// Returns the ordered list of known streams.
    async fn streams(&self) -> Result<Vec<StreamReference>>;
}
