//! Data model for the relay pipeline.
//!
//! Everything here is transient: built for one webhook delivery and
//! dropped once the broadcast call returns.

mod types;

pub use types::{BroadcastMessage, MediaAsset, MediaEvent, MediaKind, StoredObject, Variant};
