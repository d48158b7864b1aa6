//! LINE Messaging API client.
//!
//! Implements the two provider calls the relay needs:
//! - content fetch (`GET /v2/bot/message/{id}/content[/preview]`)
//! - broadcast (`POST /v2/bot/message/broadcast`)

mod client;
mod error;

pub use client::LineClient;
pub use error::LineError;
