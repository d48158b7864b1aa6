//! Media types and data structures.

use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// Kind of media carried by a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    /// Still image.
    Image,
    /// Video clip.
    Video,
}

impl MediaKind {
    /// Wire value used by the messaging provider.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Video => "video",
        }
    }

    /// Parse a provider message type. Anything but image or video is `None`.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "image" => Some(Self::Image),
            "video" => Some(Self::Video),
            _ => None,
        }
    }
}

/// Which rendition of a message's media.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    /// Full content as sent by the user.
    Original,
    /// Still preview image.
    Preview,
}

impl Variant {
    /// Storage key prefix for this variant.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Original => "original",
            Self::Preview => "preview",
        }
    }
}

/// One qualifying event from a webhook delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaEvent {
    /// Provider message ID.
    pub message_id: String,
    /// Media kind.
    pub kind: MediaKind,
}

impl MediaEvent {
    /// Create a new media event.
    #[must_use]
    pub fn new(message_id: impl Into<String>, kind: MediaKind) -> Self {
        Self {
            message_id: message_id.into(),
            kind,
        }
    }
}

/// Media bytes held in memory between fetch and publish.
#[derive(Debug, Clone)]
pub struct MediaAsset {
    /// Raw content.
    pub bytes: Bytes,
    /// MIME type reported by the source.
    pub content_type: String,
}

impl MediaAsset {
    /// Create a new media asset.
    #[must_use]
    pub fn new(bytes: impl Into<Bytes>, content_type: impl Into<String>) -> Self {
        Self {
            bytes: bytes.into(),
            content_type: content_type.into(),
        }
    }
}

/// An object written to storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    /// Storage key.
    pub key: String,
    /// Public URL the key resolves to.
    pub public_url: String,
}

/// Broadcast-ready message descriptor.
///
/// For images `preview_image_url == original_content_url`; for videos the
/// preview addresses a separate still-frame object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BroadcastMessage {
    /// Message type.
    #[serde(rename = "type")]
    pub kind: MediaKind,
    /// Public URL of the original content.
    pub original_content_url: String,
    /// Public URL of the preview image.
    pub preview_image_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_kind_parse() {
        assert_eq!(MediaKind::parse("image"), Some(MediaKind::Image));
        assert_eq!(MediaKind::parse("video"), Some(MediaKind::Video));
        assert_eq!(MediaKind::parse("text"), None);
        assert_eq!(MediaKind::parse("audio"), None);
        assert_eq!(MediaKind::parse("Image"), None);
    }

    #[test]
    fn test_broadcast_message_wire_format() {
        let message = BroadcastMessage {
            kind: MediaKind::Image,
            original_content_url: "https://cdn.example.com/original/1.jpg".to_string(),
            preview_image_url: "https://cdn.example.com/original/1.jpg".to_string(),
        };

        let json = serde_json::to_value(&message).expect("serializable");
        assert_eq!(
            json,
            serde_json::json!({
                "type": "image",
                "originalContentUrl": "https://cdn.example.com/original/1.jpg",
                "previewImageUrl": "https://cdn.example.com/original/1.jpg",
            })
        );
    }
}
