//! API Routes
//!
//! Configures the Axum router with all block cache endpoints.

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    async_cache_handler, embed_handler, health_handler, sync_cache_handler, AppState,
};
use crate::cache::LoadMode;

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /_block/js/sync` - Deferred block as HTML
/// - `GET /_block/js/async` - Deferred block as a replace script
/// - `GET /blocks/embed` - Placeholder markup for a block
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin, since sync loads are cross-origin XHRs when
///   pages are served from another host
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(LoadMode::Sync.route_path(), get(sync_cache_handler))
        .route(LoadMode::Async.route_path(), get(async_cache_handler))
        .route("/blocks/embed", get(embed_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
