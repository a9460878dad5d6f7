mod handlers;
pub(crate) mod responses;

use crate::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Build the complete API router.
pub(crate) fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any);

    Router::new()
        // Status
        .route("/api/status", get(handlers::get_status))
        // Inventory and ingestion
        .route("/api/filesystems", get(handlers::get_filesystems))
        .route("/api/samples", post(handlers::ingest_samples))
        .route("/api/collect", post(handlers::trigger_collect))
        // Forecasting
        .route("/api/analyze", post(handlers::analyze))
        // Settings
        .route("/api/settings", get(handlers::get_settings).post(handlers::update_settings))
        // SSE events
        .route("/api/events", get(handlers::sse_events))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
