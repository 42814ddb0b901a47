// SPDX-FileCopyrightText: 2026 MemeForge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gateway HTTP server built on axum.
//!
//! Sets up routes, middleware, and shared state. Rate limiting and
//! authentication live in front of this service; the gateway itself
//! only enforces the per-request timeout.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    routing::{get, post},
    Router,
};
use memeforge_core::MemeForgeError;
use memeforge_pipeline::MemePipeline;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct GatewayState {
    /// The pipeline, shared read-only across concurrent requests.
    pub pipeline: Arc<MemePipeline>,
    /// Timeout applied around pipeline execution per request.
    pub request_timeout: Duration,
    /// Process start time for uptime reporting.
    pub start_time: std::time::Instant,
}

impl GatewayState {
    /// Creates gateway state around a constructed pipeline.
    pub fn new(pipeline: Arc<MemePipeline>, request_timeout: Duration) -> Self {
        Self {
            pipeline,
            request_timeout,
            start_time: std::time::Instant::now(),
        }
    }
}

/// Gateway server configuration (mirrors `server` in memeforge-config).
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host address to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
}

/// Build the gateway router.
///
/// Routes:
/// - `GET /health` (public)
/// - `POST /v1/campaigns` (full pipeline)
/// - `POST /v1/analyze`, `POST /v1/memes`, `POST /v1/render` (per stage)
pub fn build_router(state: GatewayState) -> Router {
    let public_routes = Router::new()
        .route("/health", get(handlers::get_health))
        .with_state(state.clone());

    let api_routes = Router::new()
        .route("/v1/campaigns", post(handlers::post_campaigns))
        .route("/v1/analyze", post(handlers::post_analyze))
        .route("/v1/memes", post(handlers::post_memes))
        .route("/v1/render", post(handlers::post_render))
        .with_state(state);

    Router::new()
        .merge(public_routes)
        .merge(api_routes)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Start the gateway HTTP server and serve until the process exits.
pub async fn start_server(
    config: &ServerConfig,
    state: GatewayState,
) -> Result<(), MemeForgeError> {
    let app = build_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| MemeForgeError::Internal(format!("failed to bind gateway to {addr}: {e}")))?;

    tracing::info!("gateway listening on {addr}");

    axum::serve(listener, app)
        .await
        .map_err(|e| MemeForgeError::Internal(format!("gateway server error: {e}")))
}
