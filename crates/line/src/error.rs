//! Client construction errors.

use thiserror::Error;

/// Errors building a [`LineClient`](crate::LineClient).
#[derive(Debug, Error)]
pub enum LineError {
    /// HTTP client could not be built.
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),

    /// A configured base URL is not usable.
    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl {
        /// Configured value.
        url: String,
        /// Why it was rejected.
        reason: String,
    },
}
