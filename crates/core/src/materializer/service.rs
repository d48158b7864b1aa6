//! Media materializer implementation.

use tracing::debug;

use crate::fetch::ContentSource;
use crate::media::{BroadcastMessage, MediaEvent, MediaKind, Variant};
use crate::preview::{PreviewDeriver, PreviewSource};
use crate::relay::RelayError;
use crate::storage::ObjectPublisher;

/// Turns one media event into a broadcast-ready descriptor.
///
/// Fetch the original, publish it, then for videos obtain and publish
/// exactly one preview. Images are their own preview.
pub struct MediaMaterializer<C, D> {
    content: C,
    preview: PreviewSource<D>,
    publisher: ObjectPublisher,
}

impl<C: ContentSource, D: PreviewDeriver> MediaMaterializer<C, D> {
    /// Create a new materializer.
    #[must_use]
    pub fn new(content: C, preview: PreviewSource<D>, publisher: ObjectPublisher) -> Self {
        Self {
            content,
            preview,
            publisher,
        }
    }

    /// Materialize one event.
    ///
    /// # Errors
    ///
    /// Returns the first failing stage's error. Nothing is retried, and an
    /// original published before a preview failure is left in place.
    pub async fn materialize(&self, event: &MediaEvent) -> Result<BroadcastMessage, RelayError> {
        let message_id = event.message_id.as_str();

        let original = self.content.fetch(message_id, Variant::Original).await?;
        let original_url = self
            .publisher
            .publish(&original, event.kind, message_id, Variant::Original)
            .await?
            .public_url;

        let preview_url = match event.kind {
            MediaKind::Image => original_url.clone(),
            MediaKind::Video => {
                debug!(
                    message_id,
                    strategy = self.preview.name(),
                    "Resolving video preview"
                );
                let preview = self
                    .preview
                    .resolve(&self.content, message_id, &original)
                    .await?;
                self.publisher
                    .publish(&preview, event.kind, message_id, Variant::Preview)
                    .await?
                    .public_url
            }
        };

        Ok(BroadcastMessage {
            kind: event.kind,
            original_content_url: original_url,
            preview_image_url: preview_url,
        })
    }

    /// Get the object publisher.
    #[must_use]
    pub fn publisher(&self) -> &ObjectPublisher {
        &self.publisher
    }

    /// Get the content source.
    #[must_use]
    pub fn content(&self) -> &C {
        &self.content
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::MediaAsset;
    use crate::preview::PreviewError;
    use crate::testing::{FakeContent, FakeDeriver, memory_publisher};

    async fn exists(materializer: &MediaMaterializer<FakeContent, FakeDeriver>, key: &str) -> bool {
        materializer
            .publisher()
            .operator()
            .exists(key)
            .await
            .expect("stat should succeed")
    }

    #[tokio::test]
    async fn test_image_is_its_own_preview() {
        let materializer = MediaMaterializer::new(
            FakeContent::default().image("IMG1"),
            PreviewSource::<FakeDeriver>::Provider,
            memory_publisher(),
        );

        let message = materializer
            .materialize(&MediaEvent::new("IMG1", MediaKind::Image))
            .await
            .expect("image should materialize");

        assert_eq!(message.kind, MediaKind::Image);
        assert_eq!(
            message.original_content_url,
            "https://cdn.example.com/original/IMG1.jpg"
        );
        assert_eq!(message.preview_image_url, message.original_content_url);
        assert_eq!(
            materializer.content().calls(),
            vec![("IMG1".to_string(), Variant::Original)]
        );
        assert!(exists(&materializer, "original/IMG1.jpg").await);
        assert!(!exists(&materializer, "preview/IMG1.jpg").await);
    }

    #[tokio::test]
    async fn test_video_uses_provider_preview() {
        let materializer = MediaMaterializer::new(
            FakeContent::default().video("VID1"),
            PreviewSource::<FakeDeriver>::Provider,
            memory_publisher(),
        );

        let message = materializer
            .materialize(&MediaEvent::new("VID1", MediaKind::Video))
            .await
            .expect("video should materialize");

        assert_eq!(
            message.original_content_url,
            "https://cdn.example.com/original/VID1.mp4"
        );
        assert_eq!(
            message.preview_image_url,
            "https://cdn.example.com/preview/VID1.jpg"
        );
        assert_eq!(
            materializer.content().calls(),
            vec![
                ("VID1".to_string(), Variant::Original),
                ("VID1".to_string(), Variant::Preview),
            ]
        );

        let preview = materializer
            .publisher()
            .operator()
            .read("preview/VID1.jpg")
            .await
            .expect("preview stored");
        assert_eq!(preview.to_vec(), b"preview-VID1");
        assert!(exists(&materializer, "original/VID1.mp4").await);
    }

    #[tokio::test]
    async fn test_empty_provider_preview_is_rejected() {
        let content = FakeContent::default().video("VID4").with(
            "VID4",
            Variant::Preview,
            MediaAsset::new(Vec::<u8>::new(), "image/jpeg"),
        );
        let materializer = MediaMaterializer::new(
            content,
            PreviewSource::<FakeDeriver>::Provider,
            memory_publisher(),
        );

        let err = materializer
            .materialize(&MediaEvent::new("VID4", MediaKind::Video))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            RelayError::PreviewDerivation(PreviewError::EmptyOutput)
        ));
        assert!(!exists(&materializer, "preview/VID4.jpg").await);
    }

    #[tokio::test]
    async fn test_video_derives_preview_from_original_bytes() {
        let materializer = MediaMaterializer::new(
            FakeContent::default().video("VID2"),
            PreviewSource::Derived(FakeDeriver::default()),
            memory_publisher(),
        );

        let message = materializer
            .materialize(&MediaEvent::new("VID2", MediaKind::Video))
            .await
            .expect("video should materialize");

        assert_ne!(message.original_content_url, message.preview_image_url);
        assert_eq!(
            message.preview_image_url,
            "https://cdn.example.com/preview/VID2.jpg"
        );
        // No provider preview call when deriving locally
        assert_eq!(
            materializer.content().calls(),
            vec![("VID2".to_string(), Variant::Original)]
        );

        let PreviewSource::Derived(deriver) = &materializer.preview else {
            panic!("expected derived preview source");
        };
        assert_eq!(*deriver.inputs.lock().unwrap(), vec![b"video-VID2".to_vec()]);
        assert!(exists(&materializer, "original/VID2.mp4").await);
        assert!(exists(&materializer, "preview/VID2.jpg").await);
    }

    #[tokio::test]
    async fn test_derivation_failure_is_hard_error() {
        let materializer = MediaMaterializer::new(
            FakeContent::default().video("VID3"),
            PreviewSource::Derived(FakeDeriver {
                fail: true,
                ..FakeDeriver::default()
            }),
            memory_publisher(),
        );

        let err = materializer
            .materialize(&MediaEvent::new("VID3", MediaKind::Video))
            .await
            .unwrap_err();

        assert!(matches!(err, RelayError::PreviewDerivation(_)));
        assert!(!exists(&materializer, "preview/VID3.jpg").await);
    }

    #[tokio::test]
    async fn test_fetch_failure_publishes_nothing() {
        let materializer = MediaMaterializer::new(
            FakeContent::default(),
            PreviewSource::<FakeDeriver>::Provider,
            memory_publisher(),
        );

        let err = materializer
            .materialize(&MediaEvent::new("MISSING", MediaKind::Image))
            .await
            .unwrap_err();

        assert!(matches!(err, RelayError::RemoteFetch(_)));
        assert!(!exists(&materializer, "original/MISSING.jpg").await);
    }
}
