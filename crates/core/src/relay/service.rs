//! Media relay implementation.

use tracing::{debug, error, info};

use super::error::RelayError;
use super::payload::WebhookPayload;
use crate::broadcast::{BroadcastDispatcher, BroadcastSink};
use crate::fetch::ContentSource;
use crate::materializer::MediaMaterializer;
use crate::preview::PreviewDeriver;

/// Summary of one processed webhook delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelayReport {
    /// Events in the delivery.
    pub received: usize,
    /// Image and video events materialized.
    pub materialized: usize,
    /// Whether a broadcast call was made.
    pub broadcast: bool,
}

/// Drives a webhook delivery from raw body to broadcast.
pub struct MediaRelay<C, D, B> {
    materializer: MediaMaterializer<C, D>,
    dispatcher: BroadcastDispatcher<B>,
}

impl<C, D, B> MediaRelay<C, D, B>
where
    C: ContentSource,
    D: PreviewDeriver,
    B: BroadcastSink,
{
    /// Create a new relay.
    #[must_use]
    pub fn new(materializer: MediaMaterializer<C, D>, dispatcher: BroadcastDispatcher<B>) -> Self {
        Self {
            materializer,
            dispatcher,
        }
    }

    /// Process one webhook body.
    ///
    /// Events are materialized one at a time so the broadcast order always
    /// matches the delivery order.
    ///
    /// # Errors
    ///
    /// Returns the first error encountered. When that happens nothing is
    /// broadcast for this delivery.
    pub async fn handle(&self, body: &[u8]) -> Result<RelayReport, RelayError> {
        let payload = WebhookPayload::parse(body)?;
        let events = payload.media_events();
        debug!(
            received = payload.events.len(),
            media = events.len(),
            "Parsed webhook payload"
        );

        let mut messages = Vec::with_capacity(events.len());
        for event in &events {
            let message = self
                .materializer
                .materialize(event)
                .await
                .inspect_err(|e| {
                    error!(
                        message_id = %event.message_id,
                        kind = event.kind.as_str(),
                        error = %e,
                        "Failed to materialize media event"
                    );
                })?;
            messages.push(message);
        }

        let broadcast = self.dispatcher.dispatch(&messages).await?;

        let report = RelayReport {
            received: payload.events.len(),
            materialized: messages.len(),
            broadcast,
        };
        info!(
            received = report.received,
            materialized = report.materialized,
            broadcast = report.broadcast,
            "Processed webhook delivery"
        );
        Ok(report)
    }

    /// Get the materializer.
    #[must_use]
    pub fn materializer(&self) -> &MediaMaterializer<C, D> {
        &self.materializer
    }

    /// Get the dispatcher.
    #[must_use]
    pub fn dispatcher(&self) -> &BroadcastDispatcher<B> {
        &self.dispatcher
    }
}
