//! Preview derivation for video content.
//!
//! Images serve as their own preview and never reach this module. Videos
//! get a still image from one of two sources, chosen by configuration:
//! the provider's own preview endpoint, or a frame extracted locally.

mod error;
mod ffmpeg;

pub use error::PreviewError;
pub use ffmpeg::FfmpegFrameExtractor;

use std::future::Future;

use emma_shared::{PreviewConfig, PreviewStrategy};

use crate::fetch::ContentSource;
use crate::media::{MediaAsset, Variant};
use crate::relay::RelayError;

/// Produces a still image from video bytes.
pub trait PreviewDeriver: Send + Sync {
    /// Derive a preview image from the given video.
    fn derive_preview(
        &self,
        video: &[u8],
    ) -> impl Future<Output = Result<MediaAsset, PreviewError>> + Send;
}

/// Where a video's preview image comes from.
#[derive(Debug, Clone)]
pub enum PreviewSource<D> {
    /// Fetch the provider-side preview.
    Provider,
    /// Derive locally from the original bytes.
    Derived(D),
}

impl PreviewSource<FfmpegFrameExtractor> {
    /// Select the preview source from configuration.
    #[must_use]
    pub fn from_config(config: &PreviewConfig) -> Self {
        match config.strategy {
            PreviewStrategy::Provider => Self::Provider,
            PreviewStrategy::Ffmpeg => Self::Derived(FfmpegFrameExtractor::from_config(config)),
        }
    }
}

impl<D: PreviewDeriver> PreviewSource<D> {
    /// Produce exactly one preview asset for a video message.
    ///
    /// # Errors
    ///
    /// Returns `RemoteFetch` when the provider preview cannot be fetched and
    /// `PreviewDerivation` when local extraction fails. An empty image from
    /// either source is `PreviewDerivation` as well.
    pub async fn resolve<C: ContentSource>(
        &self,
        content: &C,
        message_id: &str,
        original: &MediaAsset,
    ) -> Result<MediaAsset, RelayError> {
        let preview = match self {
            Self::Provider => content.fetch(message_id, Variant::Preview).await?,
            Self::Derived(deriver) => deriver.derive_preview(&original.bytes).await?,
        };

        if preview.bytes.is_empty() {
            return Err(PreviewError::EmptyOutput.into());
        }
        Ok(preview)
    }

    /// Strategy name for logging.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Provider => "provider",
            Self::Derived(_) => "derived",
        }
    }
}
