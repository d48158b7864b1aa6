//! Batched broadcast of relay messages.

mod dispatcher;
mod error;

pub use dispatcher::BroadcastDispatcher;
pub use error::BroadcastError;

use std::future::Future;

use crate::media::BroadcastMessage;

/// Sends a batch of messages to every subscriber of the channel.
pub trait BroadcastSink: Send + Sync {
    /// Broadcast the messages as one call, preserving their order.
    fn broadcast(
        &self,
        messages: &[BroadcastMessage],
    ) -> impl Future<Output = Result<(), BroadcastError>> + Send;
}
