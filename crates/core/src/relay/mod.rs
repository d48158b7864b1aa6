//! Webhook payload handling.
//!
//! Parses one webhook delivery, keeps image and video events in input
//! order, materializes each one sequentially and broadcasts the collected
//! descriptors as a single batch. The first failure aborts the delivery;
//! descriptors collected before it are discarded, never broadcast.

mod error;
mod payload;
mod service;

pub use error::RelayError;
pub use payload::WebhookPayload;
pub use service::{MediaRelay, RelayReport};
