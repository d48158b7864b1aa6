//! Relay error types.

use emma_shared::AppError;
use thiserror::Error;

use crate::broadcast::BroadcastError;
use crate::fetch::FetchError;
use crate::preview::PreviewError;
use crate::storage::StorageError;

/// Errors that abort processing of a webhook delivery.
#[derive(Debug, Error)]
pub enum RelayError {
    /// Messaging provider content fetch failed.
    #[error("remote fetch failed: {0}")]
    RemoteFetch(#[from] FetchError),

    /// Frame extraction failed or produced nothing.
    #[error("preview derivation failed: {0}")]
    PreviewDerivation(#[from] PreviewError),

    /// Storage write failed.
    #[error("publish failed: {0}")]
    Publish(#[from] StorageError),

    /// Broadcast call failed.
    #[error("broadcast failed: {0}")]
    Broadcast(#[from] BroadcastError),

    /// Webhook body is not the expected shape.
    #[error("malformed webhook payload: {0}")]
    MalformedEvent(String),
}

impl RelayError {
    /// Create a malformed event error.
    #[must_use]
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedEvent(msg.into())
    }
}

impl From<RelayError> for AppError {
    fn from(err: RelayError) -> Self {
        let msg = err.to_string();
        match err {
            RelayError::MalformedEvent(_) => Self::Validation(msg),
            RelayError::RemoteFetch(_) | RelayError::Broadcast(_) => Self::ExternalService(msg),
            RelayError::Publish(_) => Self::Storage(msg),
            RelayError::PreviewDerivation(_) => Self::Internal(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_app_error() {
        let err: AppError = RelayError::malformed("missing events").into();
        assert_eq!(err.status_code(), 400);

        let err: AppError = RelayError::from(FetchError::status("1", 404)).into();
        assert_eq!(err.error_code(), "EXTERNAL_SERVICE_ERROR");

        let err: AppError = RelayError::from(BroadcastError::Timeout).into();
        assert_eq!(err.status_code(), 502);

        let err: AppError = RelayError::from(StorageError::operation("denied")).into();
        assert_eq!(err.error_code(), "STORAGE_ERROR");

        let err: AppError = RelayError::from(PreviewError::EmptyOutput).into();
        assert_eq!(err.error_code(), "INTERNAL_ERROR");
    }
}
