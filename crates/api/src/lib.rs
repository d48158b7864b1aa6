//! HTTP boundary with Axum routes.
//!
//! This crate provides:
//! - The provider webhook route
//! - A health check route
//! - Shared application state

pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::http::{HeaderName, header::AUTHORIZATION};
use emma_core::preview::FfmpegFrameExtractor;
use emma_core::relay::MediaRelay;
use emma_line::LineClient;
use emma_shared::WebhookConfig;
use tower_http::sensitive_headers::SetSensitiveRequestHeadersLayer;
use tower_http::trace::TraceLayer;

/// Relay wired to the LINE client for both fetch and broadcast.
pub type LineRelay = MediaRelay<LineClient, FfmpegFrameExtractor, LineClient>;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Media relay pipeline.
    pub relay: Arc<LineRelay>,
    /// Webhook boundary behaviour.
    pub webhook: WebhookConfig,
}

impl AppState {
    /// Create application state.
    #[must_use]
    pub fn new(relay: LineRelay, webhook: WebhookConfig) -> Self {
        Self {
            relay: Arc::new(relay),
            webhook,
        }
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState, body_limit_bytes: usize) -> Router {
    Router::new()
        .merge(routes::api_routes(body_limit_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(SetSensitiveRequestHeadersLayer::new([
            AUTHORIZATION,
            HeaderName::from_static("x-line-signature"),
        ]))
        .with_state(state)
}
