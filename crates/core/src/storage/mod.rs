//! Object publishing using Apache OpenDAL.
//!
//! This module provides vendor-agnostic object storage with support for:
//! - S3-compatible: AWS S3, Cloudflare R2, MinIO
//! - Local filesystem (development only)
//! - In-process memory (tests only)
//!
//! # Addressing
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │ key  = {variant}/{message_id}{extension}                     │
//! │ url  = {public_base_url}/{key}                               │
//! ├──────────────────────────────────────────────────────────────┤
//! │ original/512345678901.jpg  →  https://cdn/original/5123…jpg  │
//! │ preview/512345678901.jpg   →  https://cdn/preview/5123…jpg   │
//! └──────────────────────────────────────────────────────────────┘
//! ```

mod error;
mod service;

pub use error::StorageError;
pub use service::{ObjectPublisher, extension_for, public_url, storage_key};
