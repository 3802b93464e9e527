//! # Streamboard Chain
//!
//! Ethereum plumbing for Streamboard: contract reads over JSON-RPC and
//! calldata construction for the stream factory.
//!
//! ## Features
//!
//! - **RpcStreamReader**: `eth_call`-based reads of `cap()` and
//!   `streamBalance()` on stream contracts
//! - **Factory calldata**: ABI-encoded `createStreamFor` payloads for an
//!   external wallet to sign
//! - **ABI helpers**: runtime Keccak-256 selectors, word encoding, quantity
//!   decoding
//!
//! ## Example
//!
//! ```rust,ignore
//! use streamboard_chain::{ChainConfig, RpcStreamReader};
//! use streamboard_core::traits::StreamReader;
//!
//! let reader = RpcStreamReader::with_config(ChainConfig::from_env());
//! let cap = reader.cap("0x...").await?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

pub mod abi;
mod factory;
mod rpc;

pub use factory::{create_stream_calldata, CreateStreamParams, CREATE_STREAM_SIGNATURE};
pub use rpc::{ChainConfig, RpcStreamReader};
