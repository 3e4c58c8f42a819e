//! API Handlers
//!
//! HTTP request handlers for the deferred-load callbacks, the embed
//! endpoint and the health check.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use tracing::debug;

use crate::cache::{
    CacheAdapter, CacheKeys, CachePayload, CallbackHandler, DeferredBlockCache, LoadMode,
};
use crate::config::Config;
use crate::error::{BlockCacheError, Result};
use crate::models::{BlockQuery, HealthResponse};
use crate::render::{
    BlockLoader, BlockRenderer, BlockResponse, FragmentRenderer, RouteUrlGenerator, UrlGenerator,
};

/// Application state shared across all handlers.
///
/// Every collaborator is immutable and shared behind an `Arc`; handlers
/// keep no per-request state here.
#[derive(Clone)]
pub struct AppState {
    pub loader: Arc<dyn BlockLoader>,
    pub renderer: Arc<dyn BlockRenderer>,
    pub cache: Arc<dyn CacheAdapter>,
    pub callback: Arc<CallbackHandler>,
    pub mode: LoadMode,
}

impl AppState {
    /// Wires the gateway and the callback handler around the collaborators.
    pub fn new(
        loader: Arc<dyn BlockLoader>,
        renderer: Arc<dyn BlockRenderer>,
        urls: Arc<dyn UrlGenerator>,
        mode: LoadMode,
    ) -> Self {
        let cache = Arc::new(DeferredBlockCache::new(urls, mode));
        Self::with_cache(loader, renderer, cache, mode)
    }

    pub fn with_cache(
        loader: Arc<dyn BlockLoader>,
        renderer: Arc<dyn BlockRenderer>,
        cache: Arc<dyn CacheAdapter>,
        mode: LoadMode,
    ) -> Self {
        let callback = Arc::new(CallbackHandler::new(loader.clone(), renderer.clone()));
        Self {
            loader,
            renderer,
            cache,
            callback,
            mode,
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Uses the fragment renderer and a URL generator rooted at the
    /// configured base URL.
    pub fn from_config(config: &Config, loader: Arc<dyn BlockLoader>) -> Result<Self> {
        let urls = RouteUrlGenerator::for_callbacks(&config.base_url)?;
        let renderer = Arc::new(FragmentRenderer::new(loader.clone()));
        let cache = DeferredBlockCache::new(Arc::new(urls), config.mode)
            .with_ttl(config.default_ttl);

        Ok(Self::with_cache(
            loader,
            renderer,
            Arc::new(cache),
            config.mode,
        ))
    }
}

/// Handler for GET /_block/js/sync
///
/// Returns the rendered block as HTML for a blocking XHR.
pub async fn sync_cache_handler(
    State(state): State<AppState>,
    Query(query): Query<BlockQuery>,
) -> Result<BlockResponse> {
    callback(&state, &query, LoadMode::Sync).await
}

/// Handler for GET /_block/js/async
///
/// Returns a script injecting the rendered block into its placeholder.
pub async fn async_cache_handler(
    State(state): State<AppState>,
    Query(query): Query<BlockQuery>,
) -> Result<BlockResponse> {
    callback(&state, &query, LoadMode::Async).await
}

async fn callback(state: &AppState, query: &BlockQuery, mode: LoadMode) -> Result<BlockResponse> {
    let block_id = query.block_id().map_err(BlockCacheError::InvalidRequest)?;
    debug!(block_id, %mode, keys = ?query.extra, "deferred block callback");

    state.callback.respond(block_id, mode).await
}

/// Handler for GET /blocks/embed
///
/// Returns what a page inlines for the block: the gateway's placeholder,
/// or a direct render if the gateway cannot answer.
pub async fn embed_handler(
    State(state): State<AppState>,
    Query(query): Query<BlockQuery>,
) -> Result<BlockResponse> {
    let block_id = query.block_id().map_err(BlockCacheError::InvalidRequest)?;
    let block = state
        .loader
        .load(block_id)
        .await
        .ok_or_else(|| BlockCacheError::BlockNotFound(block_id.to_string()))?;
    let keys = CacheKeys::for_block(&block);

    let element = if state.cache.has(&keys) {
        state.cache.get(&keys)?
    } else {
        let rendered = state.renderer.render(&block).await?;
        state
            .cache
            .set(&keys, rendered.into(), Some(block.ttl()), Vec::new())?
    };

    Ok(match element.into_payload() {
        CachePayload::Response(response) => response,
        CachePayload::Raw(bytes) => BlockResponse::new(String::from_utf8_lossy(&bytes)),
    })
}

/// Handler for GET /health
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse::healthy(state.mode.to_string()))
}
