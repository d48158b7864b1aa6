//! In-memory fakes for pipeline tests.

use std::collections::HashMap;
use std::sync::Mutex;

use emma_shared::{StorageConfig, StorageProvider};

use crate::broadcast::{BroadcastError, BroadcastSink};
use crate::fetch::{ContentSource, FetchError};
use crate::media::{BroadcastMessage, MediaAsset, Variant};
use crate::preview::{PreviewDeriver, PreviewError};
use crate::storage::ObjectPublisher;

pub const PUBLIC_BASE: &str = "https://cdn.example.com";

/// Serves canned assets and records every fetch.
#[derive(Default)]
pub struct FakeContent {
    assets: HashMap<(String, Variant), MediaAsset>,
    pub calls: Mutex<Vec<(String, Variant)>>,
}

impl FakeContent {
    pub fn with(mut self, message_id: &str, variant: Variant, asset: MediaAsset) -> Self {
        self.assets.insert((message_id.to_string(), variant), asset);
        self
    }

    pub fn image(self, message_id: &str) -> Self {
        let bytes = format!("image-{message_id}").into_bytes();
        self.with(message_id, Variant::Original, MediaAsset::new(bytes, "image/jpeg"))
    }

    pub fn video(self, message_id: &str) -> Self {
        let bytes = format!("video-{message_id}").into_bytes();
        let preview = format!("preview-{message_id}").into_bytes();
        self.with(message_id, Variant::Original, MediaAsset::new(bytes, "video/mp4"))
            .with(message_id, Variant::Preview, MediaAsset::new(preview, "image/jpeg"))
    }

    pub fn calls(&self) -> Vec<(String, Variant)> {
        self.calls.lock().unwrap().clone()
    }
}

impl ContentSource for FakeContent {
    async fn fetch(&self, message_id: &str, variant: Variant) -> Result<MediaAsset, FetchError> {
        self.calls
            .lock()
            .unwrap()
            .push((message_id.to_string(), variant));
        self.assets
            .get(&(message_id.to_string(), variant))
            .cloned()
            .ok_or_else(|| FetchError::status(message_id, 404))
    }
}

/// Returns a fixed frame, or fails like a video with no decodable frames.
#[derive(Default)]
pub struct FakeDeriver {
    pub fail: bool,
    pub inputs: Mutex<Vec<Vec<u8>>>,
}

impl PreviewDeriver for FakeDeriver {
    async fn derive_preview(&self, video: &[u8]) -> Result<MediaAsset, PreviewError> {
        self.inputs.lock().unwrap().push(video.to_vec());
        if self.fail {
            return Err(PreviewError::EmptyOutput);
        }
        Ok(MediaAsset::new(&b"derived-frame"[..], "image/jpeg"))
    }
}

/// Records every batch it receives.
#[derive(Default)]
pub struct RecordingSink {
    pub batches: Mutex<Vec<Vec<BroadcastMessage>>>,
    pub fail: bool,
}

impl RecordingSink {
    pub fn batches(&self) -> Vec<Vec<BroadcastMessage>> {
        self.batches.lock().unwrap().clone()
    }
}

impl BroadcastSink for RecordingSink {
    async fn broadcast(&self, messages: &[BroadcastMessage]) -> Result<(), BroadcastError> {
        self.batches.lock().unwrap().push(messages.to_vec());
        if self.fail {
            return Err(BroadcastError::Status {
                status: 400,
                body: "bad request".to_string(),
            });
        }
        Ok(())
    }
}

pub fn memory_publisher() -> ObjectPublisher {
    let config = StorageConfig {
        provider: StorageProvider::Memory,
        public_base_url: PUBLIC_BASE.to_string(),
        timeout_secs: 5,
    };
    ObjectPublisher::from_config(&config).expect("should create publisher")
}
