//! Broadcast dispatcher implementation.

use tracing::{debug, info};

use super::BroadcastSink;
use super::error::BroadcastError;
use crate::media::BroadcastMessage;

/// Sends collected descriptors in a single broadcast call.
pub struct BroadcastDispatcher<B> {
    sink: B,
}

impl<B: BroadcastSink> BroadcastDispatcher<B> {
    /// Create a new dispatcher.
    #[must_use]
    pub fn new(sink: B) -> Self {
        Self { sink }
    }

    /// Dispatch the messages, in order, as one batch.
    ///
    /// An empty batch makes no remote call; the provider rejects empty
    /// broadcasts anyway. Returns whether a call was made.
    ///
    /// # Errors
    ///
    /// Returns the sink's error unchanged. Nothing is retried.
    pub async fn dispatch(&self, messages: &[BroadcastMessage]) -> Result<bool, BroadcastError> {
        if messages.is_empty() {
            debug!("No media messages to broadcast");
            return Ok(false);
        }

        self.sink.broadcast(messages).await?;
        info!(count = messages.len(), "Broadcast media messages");
        Ok(true)
    }

    /// Get the underlying sink.
    #[must_use]
    pub fn sink(&self) -> &B {
        &self.sink
    }
}
