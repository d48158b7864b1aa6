//! Broadcast error types.

use thiserror::Error;

/// Broadcast errors.
#[derive(Debug, Error)]
pub enum BroadcastError {
    /// Provider rejected the broadcast.
    #[error("broadcast failed with status {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, for diagnostics.
        body: String,
    },

    /// Request did not complete in time.
    #[error("broadcast timed out")]
    Timeout,

    /// Connection or protocol failure.
    #[error("broadcast transport error: {0}")]
    Transport(String),
}
