//! Loan Console - data caches for the loan-origination admin console
//!
//! Serves cached entity lists to the console UI and keeps them warm.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use loan_console::api::{create_router, AppState};
use loan_console::{ApiClient, Config};

/// Main entry point for the console cache service.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Build the upstream API client
/// 4. Create one cache store per entity kind
/// 5. Create Axum router with all endpoints
/// 6. Start HTTP server on configured port
/// 7. On SIGINT/SIGTERM, clear every store (stopping refresh timers) and exit
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "loan_console=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting loan console cache");

    let config = Config::from_env();
    info!(
        "Configuration loaded: api={}, stale_after={}s, refresh_interval={}s, port={}",
        config.api_base_url, config.stale_after, config.refresh_interval, config.server_port
    );

    let mut builder = ApiClient::builder()
        .base_url(config.api_base_url.clone())
        .timeout(Duration::from_secs(config.request_timeout));
    if let Some(token) = &config.api_token {
        builder = builder.auth_token(token.clone());
    }
    let client = builder.build()?;

    let state = AppState::from_config(&config, Arc::new(client));
    info!("Cache stores initialized");

    let app = create_router(state.clone());

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(state))
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// On shutdown signal, clears every store so no refresh timer outlives the server.
async fn shutdown_signal(state: AppState) {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                warn!("Failed to install SIGTERM handler: {}", err);
                std::future::pending::<()>().await;
            }
        }
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

    let cleared = state.registry.clear_all().await;
    warn!("Refresh timers stopped for {} stores", cleared.len());
}
