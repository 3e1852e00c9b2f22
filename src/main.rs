//! Storefront - session state service for a café storefront
//!
//! Provides a dual-tier TTL cache for catalog payloads and a cart store
//! with lazy product hydration, exposed over a small REST API.

mod api;
mod cache;
mod cart;
mod catalog;
mod config;
mod error;
mod models;
mod storage;
mod tasks;

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Context;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api::{create_router, AppState};
use config::Config;
use tasks::spawn_sweep_task;

/// Main entry point for the storefront service.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Construct the durable store, cache, cart, and catalog client
/// 4. Start the background cache sweep task
/// 5. Create Axum router with all endpoints
/// 6. Start HTTP server on configured port
/// 7. Handle graceful shutdown on SIGINT/SIGTERM, aborting the sweep task
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing subscriber with env filter
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "storefront=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting storefront service");

    // Load configuration from environment variables
    let config = Config::from_env();
    info!(
        "Configuration loaded: data_dir={}, catalog={}, port={}, sweep_interval={}s, product_ttl={}s",
        config.data_dir.display(),
        config.catalog_base_url,
        config.server_port,
        config.sweep_interval,
        config.product_ttl
    );

    // Construct all state explicitly; the cache and cart share one durable store
    let state = AppState::from_config(&config);
    info!("Cache and cart initialized");

    // Start background sweep task; its handle is aborted on shutdown
    let sweep_handle = spawn_sweep_task(
        state.cache.clone(),
        Duration::from_secs(config.sweep_interval),
    );
    info!("Background sweep task started");

    // Create router with all endpoints
    let app = create_router(state);

    // Bind to configured port
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);

    // Start server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(sweep_handle))
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// On shutdown signal, aborts the sweep task and allows graceful shutdown.
async fn shutdown_signal(sweep_handle: tokio::task::JoinHandle<()>) {
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

    // Abort the sweep task so a restart cannot accumulate timers
    sweep_handle.abort();
    warn!("Sweep task aborted");
}
