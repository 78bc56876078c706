//! TTL Cache - a TTL-bounded key-value cache service
//!
//! Stores opaque string values under string keys with per-entry expiry,
//! bounds entry count with expiry-ordered eviction, and fills read misses
//! through the cache.

mod api;
mod cache;
mod collection;
mod config;
mod error;
mod models;
mod service;

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api::{create_router, AppState};
use cache::{Cache, InMemoryCache, PersistentCache};
use collection::SqliteCollection;
use config::{Backend, Config};
use service::CacheService;

/// Main entry point for the TTL cache service.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Build the configured cache backend (initializing persistent storage)
/// 4. Create Axum router with all endpoints
/// 5. Start HTTP server on configured port
/// 6. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing subscriber with env filter
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ttlcache=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting TTL Cache Service");

    // Load configuration from environment variables
    let config = Config::from_env();
    info!(
        "Configuration loaded: backend={:?}, eviction={:?}, ttl={}s, max_capacity={}, port={}",
        config.backend, config.eviction, config.ttl_seconds, config.max_capacity, config.server_port
    );

    // Build the configured backend
    let cache: Arc<dyn Cache> = match config.backend {
        Backend::Memory => Arc::new(InMemoryCache::from_config(&config)),
        Backend::Sqlite => {
            let collection =
                SqliteCollection::open(&config.database_path, &config.collection_name)?;
            let cache = PersistentCache::from_config(&config, Box::new(collection));
            cache.initialize().await?;
            info!(
                "Collection '{}' initialized at {}",
                config.collection_name, config.database_path
            );
            Arc::new(cache)
        }
    };

    // Create application state with the cache service
    let state = AppState::new(CacheService::new(cache));
    info!("Cache service initialized");

    // Create router with all endpoints
    let app = create_router(state);

    // Bind to configured port
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server listening on http://{}", addr);

    // Start server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

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
