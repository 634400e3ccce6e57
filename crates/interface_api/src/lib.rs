//! HTTP API Layer
//!
//! This crate exposes claims report reconciliation over REST using Axum.
//!
//! # Architecture
//!
//! - **State**: the current Report A, Report B and their reconciliation report
//! - **Handlers**: stateless reconciliation, source replacement, report queries
//! - **Middleware**: JWT authentication and request logging
//! - **DTOs**: request bodies and the flattened row format consumers render
//! - **Error Handling**: consistent `{error, message}` responses
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::{create_router, ReconciliationState};
//!
//! let state = Arc::new(ReconciliationState::new(Reconciler::default()));
//! let app = create_router(state, config);
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod error;
pub mod middleware;
pub mod handlers;
pub mod dto;
pub mod auth;
pub mod state;

use axum::{
    extract::DefaultBodyLimit,
    Router,
    routing::{get, post, put},
    middleware as axum_middleware,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tower_http::cors::{CorsLayer, Any};

use crate::config::ApiConfig;
use crate::middleware::{auth_middleware, request_log_middleware};
use crate::handlers::{health, reconciliation};

pub use crate::state::ReconciliationState;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub reconciliation: Arc<ReconciliationState>,
    pub config: ApiConfig,
}

/// Creates the main API router
///
/// # Arguments
///
/// * `reconciliation` - Current sources and report
/// * `config` - API configuration
pub fn create_router(reconciliation: Arc<ReconciliationState>, config: ApiConfig) -> Router {
    let body_limit = config.max_body_bytes;
    let state = AppState { reconciliation, config };

    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    // Protected API routes
    let api_routes = Router::new()
        .route("/reconciliations", post(reconciliation::reconcile_reports))
        .route("/sources/:side", put(reconciliation::replace_source))
        .route("/reconciliation", get(reconciliation::list_records))
        .route("/reconciliation/summary", get(reconciliation::get_summary))
        .route("/reconciliation/records/:claim_id", get(reconciliation::get_record))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(axum_middleware::from_fn(request_log_middleware))
        .layer(axum_middleware::from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .merge(public_routes)
        .nest("/api/v1", api_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                ),
        )
        .with_state(state)
}
