//! # Streamboard Loader
//!
//! Turns stream references into the published dashboard view model.
//!
//! ## Features
//!
//! - **SummaryResolver**: per-stream cap/percent resolution through the
//!   TTL cache
//! - **StreamLoader**: concurrent aggregation over a reference list with a
//!   readiness gate and supersession of stale in-flight invocations
//!
//! ## Example
//!
//! ```rust,ignore
//! use streamboard_loader::{LoaderConfig, StreamLoader, SummaryResolver};
//!
//! let resolver = SummaryResolver::new(reader, cache);
//! let loader = StreamLoader::new(resolver, LoaderConfig::default());
//!
//! match loader.load(&references).await? {
//!     LoadOutcome::Published { streams, ready } => render(streams, ready),
//!     LoadOutcome::Superseded => {} // a newer load already took over
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod loader;
mod resolver;

pub use loader::{LoadOutcome, LoaderConfig, StreamLoader};
pub use resolver::SummaryResolver;
