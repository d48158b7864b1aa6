//! Per-event media materialization.

mod service;

pub use service::MediaMaterializer;
