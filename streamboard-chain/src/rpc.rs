//! JSON-RPC stream reader.
//!
//! Reads `cap()` and `streamBalance()` from stream contracts with plain
//! `eth_call` requests against a configurable Ethereum RPC endpoint.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use streamboard_core::constants::{DEFAULT_ETH_RPC_URL, ETH_RPC_URL_ENV};
use streamboard_core::error::{Result, StreamboardError};
use streamboard_core::traits::StreamReader;
use streamboard_core::types::is_hex_address;

use crate::abi::{decode_quantity, selector};

/// Signature of the stream contract's capacity getter.
const CAP_SIGNATURE: &str = "cap()";

/// Signature of the stream contract's balance getter.
const STREAM_BALANCE_SIGNATURE: &str = "streamBalance()";

/// Chain client configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChainConfig {
    /// Ethereum RPC URL
    pub rpc_url: String,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            rpc_url: DEFAULT_ETH_RPC_URL.into(),
            timeout_seconds: 30,
        }
    }
}

impl ChainConfig {
    /// Creates a new configuration with the given RPC URL.
    pub fn new(rpc_url: impl Into<String>) -> Self {
        Self {
            rpc_url: rpc_url.into(),
            ..Default::default()
        }
    }

    /// Reads the RPC URL from `ETH_RPC_URL`, defaulting to a public node.
    pub fn from_env() -> Self {
        match std::env::var(ETH_RPC_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => Self::new(url),
            _ => Self::default(),
        }
    }
}

/// Production [`StreamReader`] backed by Ethereum JSON-RPC.
pub struct RpcStreamReader {
    config: ChainConfig,
    http_client: reqwest::Client,
    cap_selector: [u8; 4],
    balance_selector: [u8; 4],
}

impl RpcStreamReader {
    /// Creates a reader with default configuration for the given RPC URL.
    pub fn new(rpc_url: impl Into<String>) -> Self {
        Self::with_config(ChainConfig::new(rpc_url))
    }

    /// Creates a reader with custom configuration.
    pub fn with_config(config: ChainConfig) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_seconds))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            config,
            http_client,
            cap_selector: selector(CAP_SIGNATURE),
            balance_selector: selector(STREAM_BALANCE_SIGNATURE),
        }
    }

    /// Issues an `eth_call` and returns the raw result hex.
    async fn eth_call(&self, to: &str, data: String) -> Result<String> {
        let request = serde_json::json!({
            "jsonrpc": "2.0",
            "method": "eth_call",
            "params": [
                { "to": to, "data": data },
                "latest"
            ],
            "id": 1
        });

        let response = self
            .http_client
            .post(&self.config.rpc_url)
            .json(&request)
            .send()
            .await
            .map_err(|e| StreamboardError::HttpError(e.to_string()))?;

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| StreamboardError::HttpError(e.to_string()))?;

        if let Some(error) = json.get("error") {
            warn!(to, error = ?error, "eth_call returned an error");
            let message = error
                .get("message")
                .and_then(|m| m.as_str())
                .unwrap_or("unknown RPC error");
            return Err(StreamboardError::RpcError(message.into()));
        }

        json.get("result")
            .and_then(|v| v.as_str())
            .map(str::to_owned)
            .ok_or_else(|| StreamboardError::RpcError("response has no result".into()))
    }

    /// Calls a no-argument getter on `address` and decodes the quantity.
    async fn read_quantity(&self, address: &str, selector: [u8; 4]) -> Result<u128> {
        if !is_hex_address(address) {
            return Err(StreamboardError::InvalidAddress(address.into()));
        }

        let data = format!("0x{}", hex::encode(selector));
        let result = self.eth_call(address, data).await?;
        let value = decode_quantity(&result)?;

        debug!(address, value, "Read quantity");
        Ok(value)
    }
}

#[async_trait]
impl StreamReader for RpcStreamReader {
    #[instrument(skip(self))]
    async fn cap(&self, address: &str) -> Result<u128> {
        self.read_quantity(address, self.cap_selector).await
    }

    #[instrument(skip(self))]
    async fn stream_balance(&self, address: &str) -> Result<u128> {
        self.read_quantity(address, self.balance_selector).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const ADDR: &str = "0x1111111111111111111111111111111111111111";

    async fn rpc_server(result: &str) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "jsonrpc": "2.0",
                "id": 1,
                "result": result,
            })))
            .mount(&server)
            .await;
        server
    }

    #[tokio::test]
    async fn test_cap_decodes_quantity() {
        // 1 token in raw units
        let server = rpc_server(&format!("0x{:064x}", 1_000_000_000_000_000_000u128)).await;
        let reader = RpcStreamReader::new(server.uri());

        let cap = reader.cap(ADDR).await.unwrap();
        assert_eq!(cap, 1_000_000_000_000_000_000);
    }

    #[tokio::test]
    async fn test_stream_balance_decodes_quantity() {
        let server = rpc_server(&format!("0x{:064x}", 250u128)).await;
        let reader = RpcStreamReader::new(server.uri());

        let balance = reader.stream_balance(ADDR).await.unwrap();
        assert_eq!(balance, 250);
    }

    #[tokio::test]
    async fn test_sends_eth_call_with_target_address() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/"))
            .and(body_partial_json(serde_json::json!({
                "method": "eth_call",
                "params": [{ "to": ADDR }, "latest"],
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "jsonrpc": "2.0",
                "id": 1,
                "result": format!("0x{:064x}", 7u128),
            })))
            .expect(1)
            .mount(&server)
            .await;

        let reader = RpcStreamReader::new(server.uri());
        assert_eq!(reader.cap(ADDR).await.unwrap(), 7);
    }

    #[tokio::test]
    async fn test_rpc_error_propagates() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "jsonrpc": "2.0",
                "id": 1,
                "error": { "code": -32000, "message": "execution reverted" },
            })))
            .mount(&server)
            .await;

        let reader = RpcStreamReader::new(server.uri());
        let err = reader.cap(ADDR).await.unwrap_err();
        assert!(matches!(err, StreamboardError::RpcError(_)));
        assert!(err.to_string().contains("execution reverted"));
    }

    #[tokio::test]
    async fn test_invalid_address_rejected_without_request() {
        let reader = RpcStreamReader::new("http://127.0.0.1:1");
        let err = reader.cap("not-an-address").await.unwrap_err();
        assert!(matches!(err, StreamboardError::InvalidAddress(_)));
    }
}
