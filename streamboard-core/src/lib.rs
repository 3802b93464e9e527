//! # Streamboard Core
//!
//! Core types, errors, and traits for the Streamboard token-stream dashboard.
//!
//! This crate provides the foundational building blocks used by all other
//! Streamboard crates:
//!
//! - **Types**: Domain models for stream references, summaries, and the view model
//! - **Errors**: Comprehensive error types with context
//! - **Constants**: Token scale, defaults, and environment keys
//! - **Traits**: Capabilities for reading stream state and indexing streams
//!
//! ## Example
//!
//! ```rust
//! use streamboard_core::{StreamReference, StreamSummary};
//!
//! let reference = StreamReference::new(
//!     "0x1111111111111111111111111111111111111111",
//!     "0x2222222222222222222222222222222222222222",
//!     "0x3333333333333333333333333333333333333333",
//! );
//! let summary = StreamSummary::from_raw(1_000_000_000_000_000_000, 250_000_000_000_000_000);
//! assert_eq!(summary.known_percent(), Some(25.0));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, clippy::all)]

pub mod constants;
pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used items at crate root
pub use constants::*;
pub use error::{Result, StreamboardError};
pub use traits::*;
pub use types::*;
