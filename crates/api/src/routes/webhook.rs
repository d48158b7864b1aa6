//! Messaging provider webhook route.
//!
//! Thin wrapper over [`MediaRelay::handle`](emma_core::relay::MediaRelay::handle).
//! The provider expects a prompt 200 regardless of what happens downstream,
//! so failures are logged and acknowledged unless `webhook.ack_on_failure`
//! is turned off.

use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};
use bytes::Bytes;
use emma_shared::AppError;
use serde_json::json;
use tower_http::limit::RequestBodyLimitLayer;
use tracing::{debug, error};

use crate::AppState;

/// Constant acknowledgement body.
const ACK_BODY: &str = "OK";

/// Creates the webhook route.
pub fn routes(body_limit_bytes: usize) -> Router<AppState> {
    Router::new()
        .route("/webhook", post(receive_webhook))
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(body_limit_bytes))
}

/// POST `/webhook`
/// Relay image and video events as a broadcast.
async fn receive_webhook(State(state): State<AppState>, body: Bytes) -> Response {
    debug!(body = %String::from_utf8_lossy(&body), "Received webhook");

    match state.relay.handle(&body).await {
        Ok(_) => acknowledge(),
        Err(e) => {
            error!(error = %e, "Webhook processing failed");
            if state.webhook.ack_on_failure {
                acknowledge()
            } else {
                error_response(&AppError::from(e))
            }
        }
    }
}

fn acknowledge() -> Response {
    (StatusCode::OK, Json(ACK_BODY)).into_response()
}

fn error_response(err: &AppError) -> Response {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (
        status,
        Json(json!({
            "error": err.error_code(),
            "message": err.to_string(),
        })),
    )
        .into_response()
}
