//! Webhook payload parsing.

use serde::Deserialize;
use serde_json::Value;

use super::error::RelayError;
use crate::media::{MediaEvent, MediaKind};

/// Inbound webhook body.
///
/// Only `events` is required. Entries are kept loose so that unknown
/// event shapes are skipped instead of failing the whole delivery.
#[derive(Debug, Deserialize)]
pub struct WebhookPayload {
    /// Events in delivery order.
    pub events: Vec<Value>,
}

impl WebhookPayload {
    /// Parse a raw webhook body.
    ///
    /// # Errors
    ///
    /// Returns `MalformedEvent` if the body is not a JSON object with an
    /// `events` array.
    pub fn parse(body: &[u8]) -> Result<Self, RelayError> {
        serde_json::from_slice(body).map_err(|e| RelayError::malformed(e.to_string()))
    }

    /// Image and video events, in delivery order.
    #[must_use]
    pub fn media_events(&self) -> Vec<MediaEvent> {
        self.events.iter().filter_map(media_event).collect()
    }
}

fn media_event(entry: &Value) -> Option<MediaEvent> {
    let message = entry.get("message")?;
    let kind = MediaKind::parse(message.get("type")?.as_str()?)?;
    let id = message.get("id")?.as_str()?;
    Some(MediaEvent::new(id, kind))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_image_and_video_in_order() {
        let body = br#"{"events":[
            {"type":"message","message":{"type":"video","id":"A"}},
            {"type":"message","message":{"type":"text","id":"T","text":"hi"}},
            {"type":"message","message":{"type":"image","id":"B"}},
            {"type":"follow"},
            {"type":"message","message":{"type":"video","id":"C"}}
        ]}"#;

        let events = WebhookPayload::parse(body)
            .expect("valid payload")
            .media_events();

        assert_eq!(
            events,
            vec![
                MediaEvent::new("A", MediaKind::Video),
                MediaEvent::new("B", MediaKind::Image),
                MediaEvent::new("C", MediaKind::Video),
            ]
        );
    }

    #[test]
    fn test_skips_entries_with_missing_or_odd_fields() {
        let body = br#"{"events":[
            {"message":{"type":"image"}},
            {"message":{"id":"X"}},
            {"message":{"type":"image","id":42}},
            {"message":null},
            "not-an-object",
            {"message":{"type":"image","id":"OK"}}
        ]}"#;

        let events = WebhookPayload::parse(body)
            .expect("valid payload")
            .media_events();
        assert_eq!(events, vec![MediaEvent::new("OK", MediaKind::Image)]);
    }

    #[test]
    fn test_empty_events_is_valid() {
        let events = WebhookPayload::parse(br#"{"destination":"U1","events":[]}"#)
            .expect("verification payload")
            .media_events();
        assert!(events.is_empty());
    }

    #[test]
    fn test_malformed_bodies() {
        let bodies: [&[u8]; 4] = [b"not json", br#"{}"#, br#"{"events":{}}"#, br#"[]"#];
        for body in bodies {
            let err = WebhookPayload::parse(body).unwrap_err();
            assert!(matches!(err, RelayError::MalformedEvent(_)), "body: {body:?}");
        }
    }
}
