//! Media materialization pipeline for the Emma relay.
//!
//! This crate turns inbound message references into durably stored,
//! publicly addressable objects and broadcast-ready descriptors. It has
//! ZERO web framework dependencies; the messaging provider and the HTTP
//! boundary live in other crates and plug in through the traits here.
//!
//! # Modules
//!
//! - `media` - Data model shared by every stage
//! - `fetch` - Content retrieval contract
//! - `preview` - Preview derivation and the preview-source strategy
//! - `storage` - Object publishing over Apache OpenDAL
//! - `materializer` - Fetch, derive and publish for one event
//! - `broadcast` - Batch dispatch of descriptors
//! - `relay` - Webhook payload handling end to end

pub mod broadcast;
pub mod fetch;
pub mod materializer;
pub mod media;
pub mod preview;
pub mod relay;
pub mod storage;

#[cfg(test)]
pub(crate) mod testing;
