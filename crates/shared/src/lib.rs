//! Shared configuration and error types for the Emma media relay.
//!
//! This crate provides common types used across all other crates:
//! - Process-wide configuration, loaded once and immutable afterwards
//! - Application-wide error type used at the HTTP boundary

pub mod config;
pub mod error;

pub use config::{
    AppConfig, LineConfig, PreviewConfig, PreviewStrategy, ServerConfig, StorageConfig,
    StorageProvider, WebhookConfig,
};
pub use error::AppError;
