//! API route definitions.

use axum::Router;

use crate::AppState;

pub mod health;
pub mod webhook;

/// Creates the router with all routes.
pub fn api_routes(body_limit_bytes: usize) -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(webhook::routes(body_limit_bytes))
}
