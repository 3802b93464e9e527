//! Error types for Streamboard.
//!
//! This module provides a comprehensive error hierarchy using `thiserror`.
//! All errors include context and are designed to be actionable.

use thiserror::Error;

/// Result type alias using `StreamboardError`.
pub type Result<T> = std::result::Result<T, StreamboardError>;

/// Main error type for all Streamboard operations.
#[derive(Debug, Error)]
pub enum StreamboardError {
    // ═══════════════════════════════════════════════════════════════════════════
    // NETWORK ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// Ethereum JSON-RPC call failed.
    #[error("RPC call failed: {0}")]
    RpcError(String),

    /// Subgraph query failed or returned errors.
    #[error("Subgraph query failed: {0}")]
    SubgraphError(String),

    // ═══════════════════════════════════════════════════════════════════════════
    // AGGREGATION ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// A stream list aggregation failed; carries the first failed resolution.
    #[error("Aggregation failed at stream {address}: {source}")]
    Aggregation {
        /// Address of the first stream whose resolution failed.
        address: String,
        /// The underlying resolution failure.
        #[source]
        source: Box<StreamboardError>,
    },

    // ═══════════════════════════════════════════════════════════════════════════
    // VALIDATION ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Invalid Ethereum address format.
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    /// Invalid token amount (not decimal, too many fractional digits, overflow).
    #[error("Invalid token amount: {0}")]
    InvalidAmount(String),

    /// Input validation failed.
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    // ═══════════════════════════════════════════════════════════════════════════
    // SERIALIZATION ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Invalid hex encoding.
    #[error("Invalid hex encoding: {0}")]
    HexError(#[from] hex::FromHexError),
}

impl StreamboardError {
    /// Returns true if this error is recoverable (re-invoking the loader can succeed).
    pub fn is_recoverable(&self) -> bool {
        match self {
            StreamboardError::HttpError(_)
            | StreamboardError::RpcError(_)
            | StreamboardError::SubgraphError(_) => true,
            StreamboardError::Aggregation { source, .. } => source.is_recoverable(),
            _ => false,
        }
    }

    /// Returns true if this is a validation error (bad input, not a transient fault).
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            StreamboardError::InvalidAddress(_)
                | StreamboardError::InvalidAmount(_)
                | StreamboardError::ValidationError(_)
        )
    }
}
