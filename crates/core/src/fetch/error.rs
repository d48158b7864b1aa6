//! Content fetch error types.

use thiserror::Error;

/// Content fetch errors.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Provider answered with a non-success status.
    #[error("content fetch for message {message_id} failed with status {status}")]
    Status {
        /// Message that was requested.
        message_id: String,
        /// HTTP status code.
        status: u16,
    },

    /// Request did not complete in time.
    #[error("content fetch for message {message_id} timed out")]
    Timeout {
        /// Message that was requested.
        message_id: String,
    },

    /// Connection or protocol failure.
    #[error("content fetch transport error: {0}")]
    Transport(String),
}

impl FetchError {
    /// Create a status error.
    #[must_use]
    pub fn status(message_id: impl Into<String>, status: u16) -> Self {
        Self::Status {
            message_id: message_id.into(),
            status,
        }
    }

    /// Create a timeout error.
    #[must_use]
    pub fn timeout(message_id: impl Into<String>) -> Self {
        Self::Timeout {
            message_id: message_id.into(),
        }
    }

    /// Create a transport error.
    #[must_use]
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }
}
