//! API route handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use tracing::{debug, info};

use streamboard_chain::{create_stream_calldata, CreateStreamParams, CREATE_STREAM_SIGNATURE};
use streamboard_core::types::is_hex_address;
use streamboard_loader::LoadOutcome;

use crate::dto::*;
use crate::error::ApiError;
use crate::state::AppState;

type Result<T> = std::result::Result<T, ApiError>;

/// GET /health
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let (streams, ready) = state.loader.snapshot();

    Json(HealthResponse {
        status: "ok".into(),
        version: env!("CARGO_PKG_VERSION").into(),
        uptime_seconds: state.started_at.elapsed().as_secs(),
        streams_published: streams.len(),
        ready,
    })
}

/// GET /api/v1/streams
pub async fn list_streams(State(state): State<Arc<AppState>>) -> Json<ListStreamsResponse> {
    let (streams, ready) = state.loader.snapshot();
    let total = streams.len();

    Json(ListStreamsResponse {
        streams: streams.into_iter().map(StreamDto::from).collect(),
        total,
        ready,
    })
}

/// POST /api/v1/streams/refresh
///
/// Fetches the reference list from the indexer and runs one aggregation
/// invocation over it.
pub async fn refresh_streams(
    State(state): State<Arc<AppState>>,
) -> Result<Json<RefreshResponse>> {
    let references = state.index.streams().await.map_err(ApiError::from)?;
    debug!(count = references.len(), "Refreshing stream view");

    let outcome = state.loader.load(&references).await.map_err(ApiError::from)?;

    let response = match outcome {
        LoadOutcome::Published { streams, ready } => {
            info!(count = streams.len(), ready, "Refresh published");
            RefreshResponse {
                published: true,
                count: streams.len(),
                ready,
            }
        }
        LoadOutcome::Superseded => RefreshResponse {
            published: false,
            count: 0,
            ready: state.loader.is_ready(),
        },
    };

    Ok(Json(response))
}

/// GET /api/v1/streams/:address
pub async fn get_stream(
    State(state): State<Arc<AppState>>,
    Path(address): Path<String>,
) -> Result<Json<SummaryResponse>> {
    if !is_hex_address(&address) {
        return Err(ApiError::bad_request(format!("Invalid address: {address}")));
    }

    let summary = state
        .loader
        .resolver()
        .resolve(&address)
        .await
        .map_err(ApiError::from)?;

    Ok(Json(SummaryResponse {
        address,
        cap: summary.cap,
        percent: summary.known_percent(),
    }))
}

/// POST /api/v1/streams/calldata
pub async fn create_calldata(
    State(_state): State<Arc<AppState>>,
    Json(req): Json<CalldataRequest>,
) -> Result<Json<CalldataResponse>> {
    let params = CreateStreamParams {
        recipient: req.recipient,
        cap: req.amount,
        frequency_weeks: req.frequency_weeks,
        start_full: req.start_full,
        token: req.token,
    };

    let calldata = create_stream_calldata(&params).map_err(ApiError::from)?;

    debug!(recipient = %params.recipient, "Built create-stream calldata");

    Ok(Json(CalldataResponse {
        calldata,
        function: CREATE_STREAM_SIGNATURE.into(),
    }))
}

/// GET /api/v1/cache/stats
pub async fn cache_stats(State(state): State<Arc<AppState>>) -> Json<CacheStatsResponse> {
    let stats = state.loader.resolver().cache().stats();
    Json(CacheStatsResponse::from(stats))
}
