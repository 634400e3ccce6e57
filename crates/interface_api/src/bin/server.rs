//! Claims Reconciliation - API Server Binary
//!
//! This binary starts the HTTP API server for claims report reconciliation.
//!
//! # Usage
//!
//! ```bash
//! # Run with empty reports
//! API_JWT_SECRET=... cargo run --bin claims-recon-api
//!
//! # Seed both reports from JSON files
//! API_JWT_SECRET=... API_SOURCE_A_PATH=report_a.json API_SOURCE_B_PATH=report_b.json \
//!     cargo run --bin claims-recon-api
//! ```
//!
//! # Environment Variables
//!
//! * `API_HOST` - Server host (default: 0.0.0.0)
//! * `API_PORT` - Server port (default: 8080)
//! * `API_JWT_SECRET` - JWT signing secret (required)
//! * `API_JWT_EXPIRATION_SECS` - JWT token expiration in seconds (default: 3600)
//! * `API_LOG_LEVEL` - Log level: trace, debug, info, warn, error (default: info)
//! * `API_MAX_BODY_BYTES` - Largest accepted request body (default: 64 MiB)
//! * `API_DUPLICATE_POLICY` - `last_wins` or `reject` (default: last_wins)
//! * `API_SOURCE_A_PATH` / `API_SOURCE_B_PATH` - JSON arrays of claim records

use anyhow::Context;
use interface_api::{config::ApiConfig, create_router, ReconciliationState};
use domain_reconciliation::{JsonFileClaimSource, Reconciler};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Main entry point for the API server.
///
/// # Errors
///
/// Returns an error if:
/// - An `API_*` variable cannot be parsed or the configuration is invalid
/// - A configured seed file cannot be read or reconciled
/// - Server fails to bind to the configured address
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (useful for local development)
    dotenvy::dotenv().ok();

    let config = ApiConfig::from_env().context("Failed to read API_* configuration")?;
    config.validate().context("Invalid configuration")?;

    init_tracing(&config.log_level);

    tracing::info!(
        host = %config.host,
        port = %config.port,
        duplicate_policy = ?config.duplicate_policy,
        "Starting claims reconciliation API server"
    );

    let reconciliation = Arc::new(build_state(&config).await?);
    let app = create_router(reconciliation, config.clone());

    let addr: SocketAddr = config
        .server_addr()
        .parse()
        .with_context(|| format!("Invalid server address {}", config.server_addr()))?;

    tracing::info!(%addr, "Server listening");

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// `RUST_LOG` takes precedence over the configured level.
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}

/// Builds the initial state, seeding from JSON files when both are configured.
async fn build_state(config: &ApiConfig) -> anyhow::Result<ReconciliationState> {
    let reconciler = Reconciler::new(config.reconcile_options());

    match config.seed_paths() {
        Some((a, b)) => {
            tracing::info!(report_a = %a.display(), report_b = %b.display(), "Seeding claim reports");
            let source = JsonFileClaimSource::new(a, b);
            let state = ReconciliationState::load(reconciler, &source)
                .await
                .context("Failed to seed claim reports")?;
            Ok(state)
        }
        None => Ok(ReconciliationState::new(reconciler)),
    }
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
