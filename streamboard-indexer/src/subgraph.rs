//! Subgraph queries for the stream factory.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use streamboard_core::constants::{DEFAULT_SUBGRAPH_ENDPOINT, SUBGRAPH_ENDPOINT_ENV};
use streamboard_core::error::{Result, StreamboardError};
use streamboard_core::traits::StreamIndex;
use streamboard_core::types::StreamReference;

/// Query for every stream the factory has deployed.
const STREAMS_QUERY: &str = "{ streams(first: 100) { id stream owner user } }";

/// Subgraph client configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SubgraphConfig {
    /// GraphQL endpoint of the factory subgraph
    pub endpoint: String,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
}

impl Default for SubgraphConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_SUBGRAPH_ENDPOINT.into(),
            timeout_seconds: 30,
        }
    }
}

impl SubgraphConfig {
    /// Creates a new configuration with the given endpoint.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Default::default()
        }
    }

    /// Reads the endpoint from `SUBGRAPH_ENDPOINT`, defaulting to a local
    /// graph node.
    pub fn from_env() -> Self {
        match std::env::var(SUBGRAPH_ENDPOINT_ENV) {
            Ok(endpoint) if !endpoint.trim().is_empty() => Self::new(endpoint),
            _ => Self::default(),
        }
    }
}

/// One `streams` record as the subgraph returns it.
#[derive(Debug, Deserialize)]
struct StreamRecord {
    stream: String,
    owner: String,
    user: String,
}

#[derive(Debug, Deserialize)]
struct StreamsData {
    streams: Vec<StreamRecord>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct GraphQlResponse {
    data: Option<StreamsData>,
    errors: Option<Vec<GraphQlError>>,
}

/// Production [`StreamIndex`] backed by the factory subgraph.
pub struct SubgraphClient {
    config: SubgraphConfig,
    http_client: reqwest::Client,
}

impl SubgraphClient {
    /// Creates a client with default configuration for the given endpoint.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_config(SubgraphConfig::new(endpoint))
    }

    /// Creates a client with custom configuration.
    pub fn with_config(config: SubgraphConfig) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_seconds))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            config,
            http_client,
        }
    }

    async fn query(&self) -> Result<GraphQlResponse> {
        let request = serde_json::json!({ "query": STREAMS_QUERY });

        let response = self
            .http_client
            .post(&self.config.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| StreamboardError::HttpError(e.to_string()))?;

        response
            .json()
            .await
            .map_err(|e| StreamboardError::HttpError(e.to_string()))
    }
}

#[async_trait]
impl StreamIndex for SubgraphClient {
    #[instrument(skip(self))]
    async fn streams(&self) -> Result<Vec<StreamReference>> {
        let response = self.query().await?;

        if let Some(errors) = response.errors {
            if let Some(first) = errors.first() {
                warn!(error = %first.message, "Subgraph returned errors");
                return Err(StreamboardError::SubgraphError(first.message.clone()));
            }
        }

        let data = response
            .data
            .ok_or_else(|| StreamboardError::SubgraphError("response has no data".into()))?;

        let references: Vec<StreamReference> = data
            .streams
            .into_iter()
            .map(|record| StreamReference::new(record.stream, record.owner, record.user))
            .collect();

        debug!(count = references.len(), "Fetched stream references");
        Ok(references)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn subgraph_server(body: serde_json::Value) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&server)
            .await;
        server
    }

    #[tokio::test]
    async fn test_streams_maps_records() {
        let server = subgraph_server(serde_json::json!({
            "data": {
                "streams": [
                    {
                        "id": "0xaaa",
                        "stream": "0x1111111111111111111111111111111111111111",
                        "owner": "0x2222222222222222222222222222222222222222",
                        "user": "0x3333333333333333333333333333333333333333",
                    },
                    {
                        "id": "0xbbb",
                        "stream": "0x4444444444444444444444444444444444444444",
                        "owner": "0x5555555555555555555555555555555555555555",
                        "user": "0x6666666666666666666666666666666666666666",
                    },
                ]
            }
        }))
        .await;

        let client = SubgraphClient::new(server.uri());
        let references = client.streams().await.unwrap();

        assert_eq!(references.len(), 2);
        assert_eq!(
            references[0].address,
            "0x1111111111111111111111111111111111111111"
        );
        assert_eq!(
            references[0].owner,
            "0x2222222222222222222222222222222222222222"
        );
        assert_eq!(
            references[0].recipient,
            "0x3333333333333333333333333333333333333333"
        );
        // order is preserved
        assert_eq!(
            references[1].address,
            "0x4444444444444444444444444444444444444444"
        );
    }

    #[tokio::test]
    async fn test_empty_stream_list() {
        let server = subgraph_server(serde_json::json!({
            "data": { "streams": [] }
        }))
        .await;

        let client = SubgraphClient::new(server.uri());
        assert!(client.streams().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_graphql_errors_surface() {
        let server = subgraph_server(serde_json::json!({
            "errors": [{ "message": "subgraph is syncing" }]
        }))
        .await;

        let client = SubgraphClient::new(server.uri());
        let err = client.streams().await.unwrap_err();
        assert!(matches!(err, StreamboardError::SubgraphError(_)));
        assert!(err.to_string().contains("subgraph is syncing"));
    }

    #[tokio::test]
    async fn test_missing_data_is_an_error() {
        let server = subgraph_server(serde_json::json!({})).await;

        let client = SubgraphClient::new(server.uri());
        assert!(matches!(
            client.streams().await,
            Err(StreamboardError::SubgraphError(_))
        ));
    }
}
