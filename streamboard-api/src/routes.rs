//! API route configuration.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers;
use crate::state::AppState;

/// Creates the API router with all routes configured.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Stream view
        .route("/api/v1/streams", get(handlers::list_streams))
        .route("/api/v1/streams/refresh", post(handlers::refresh_streams))
        .route("/api/v1/streams/calldata", post(handlers::create_calldata))
        .route("/api/v1/streams/:address", get(handlers::get_stream))
        // Cache
        .route("/api/v1/cache/stats", get(handlers::cache_stats))
        .with_state(state)
}
