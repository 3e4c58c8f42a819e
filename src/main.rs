//! Block Cache - deferred rendering of content blocks
//!
//! Serves deferred-load callbacks for content blocks over HTTP.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use block_cache::api::{create_router, AppState};
use block_cache::config::Config;
use block_cache::render::InMemoryBlockLoader;

/// Main entry point for the block cache server.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Seed the block store from `BLOCKS_FILE`, if set
/// 4. Wire the cache gateway and callback handler
/// 5. Start HTTP server on configured port
/// 6. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "block_cache=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting block cache server");

    let config = Config::from_env();
    info!(
        "Configuration loaded: mode={}, base_url={}, default_ttl={}s, port={}",
        config.mode, config.base_url, config.default_ttl, config.server_port
    );

    let loader = match &config.blocks_file {
        Some(path) => {
            let json = tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("reading blocks file {}", path.display()))?;
            InMemoryBlockLoader::from_json(&json)?
        }
        None => InMemoryBlockLoader::new(),
    };
    info!("Block store initialized with {} blocks", loader.len().await);

    let state = AppState::from_config(&config, Arc::new(loader))?;
    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving http")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }
}
