//! Media retrieval from the messaging provider.
//!
//! The provider client lives outside this crate; it implements
//! [`ContentSource`] so the pipeline can be driven by fakes in tests.

mod error;

pub use error::FetchError;

use std::future::Future;

use crate::media::{MediaAsset, Variant};

/// Retrieves media bytes and content type for a message.
///
/// Implementations make exactly one outbound call per invocation and keep
/// no state between calls. Failures are not retried.
pub trait ContentSource: Send + Sync {
    /// Fetch the given variant of a message's content.
    fn fetch(
        &self,
        message_id: &str,
        variant: Variant,
    ) -> impl Future<Output = Result<MediaAsset, FetchError>> + Send;
}
