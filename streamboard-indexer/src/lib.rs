//! # Streamboard Indexer
//!
//! Client for the stream factory's GraphQL indexing service (subgraph).
//!
//! The subgraph records every stream the factory deploys; this crate turns
//! its `streams` entity into the [`StreamReference`] list the loader
//! consumes.
//!
//! ## Example
//!
//! ```rust,ignore
//! use streamboard_indexer::{SubgraphClient, SubgraphConfig};
//! use streamboard_core::traits::StreamIndex;
//!
//! let client = SubgraphClient::with_config(SubgraphConfig::from_env());
//! let references = client.streams().await?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod subgraph;

pub use subgraph::{SubgraphClient, SubgraphConfig};
