//! Preview derivation error types.

use std::time::Duration;

use thiserror::Error;

/// Preview derivation errors.
#[derive(Debug, Error)]
pub enum PreviewError {
    /// Extraction tool could not be started.
    #[error("failed to start frame extractor: {0}")]
    Spawn(String),

    /// Extraction tool exited unsuccessfully.
    #[error("frame extractor exited with {code:?}: {stderr}")]
    ExitStatus {
        /// Exit code, `None` when killed by a signal.
        code: Option<i32>,
        /// Captured standard error.
        stderr: String,
    },

    /// Extraction succeeded but produced no image.
    #[error("frame extractor produced no output")]
    EmptyOutput,

    /// Extraction did not finish in time.
    #[error("frame extraction timed out after {0:?}")]
    Timeout(Duration),

    /// Scratch file handling failed.
    #[error("preview scratch I/O failed: {0}")]
    Io(#[from] std::io::Error),
}
