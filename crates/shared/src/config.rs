//! Application configuration management.

use std::path::PathBuf;

use serde::Deserialize;

/// Application configuration.
///
/// Loaded once at startup and passed by reference into component
/// constructors. Nothing mutates it afterwards.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Messaging provider configuration.
    pub line: LineConfig,
    /// Object storage configuration.
    pub storage: StorageConfig,
    /// Video preview configuration.
    #[serde(default)]
    pub preview: PreviewConfig,
    /// Webhook boundary behaviour.
    #[serde(default)]
    pub webhook: WebhookConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Maximum accepted webhook body size in bytes.
    #[serde(default = "default_body_limit")]
    pub body_limit_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            body_limit_bytes: default_body_limit(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_body_limit() -> usize {
    1024 * 1024 // 1 MiB
}

/// Messaging provider (LINE Messaging API) configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LineConfig {
    /// Channel access token sent as a bearer credential.
    pub channel_access_token: String,
    /// Base URL of the messaging API (broadcast).
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// Base URL of the content API (message content and previews).
    #[serde(default = "default_data_api_base_url")]
    pub data_api_base_url: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_line_timeout")]
    pub timeout_secs: u64,
}

fn default_api_base_url() -> String {
    "https://api.line.me".to_string()
}

fn default_data_api_base_url() -> String {
    "https://api-data.line.me".to_string()
}

fn default_line_timeout() -> u64 {
    10
}

/// Storage provider configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StorageProvider {
    /// S3-compatible storage: AWS S3, Cloudflare R2, MinIO
    S3 {
        /// Custom endpoint URL. AWS is used when absent.
        #[serde(default)]
        endpoint: Option<String>,
        /// S3 bucket name.
        bucket: String,
        /// AWS region.
        #[serde(default = "default_region")]
        region: String,
        /// AWS access key ID. Falls back to the ambient AWS credential chain.
        #[serde(default)]
        access_key_id: Option<String>,
        /// AWS secret access key.
        #[serde(default)]
        secret_access_key: Option<String>,
    },
    /// Local filesystem (development only)
    Fs {
        /// Root directory path.
        root: PathBuf,
    },
    /// In-process memory (tests only)
    Memory,
}

fn default_region() -> String {
    "us-east-1".to_string()
}

impl StorageProvider {
    /// Get the provider name for logging.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::S3 { .. } => "s3",
            Self::Fs { .. } => "fs",
            Self::Memory => "memory",
        }
    }

    /// Get the bucket name.
    #[must_use]
    pub fn bucket(&self) -> &str {
        match self {
            Self::S3 { bucket, .. } => bucket,
            Self::Fs { root } => root.to_str().unwrap_or("local"),
            Self::Memory => "memory",
        }
    }
}

/// Object storage configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Storage provider configuration.
    pub provider: StorageProvider,
    /// Public base URL that storage keys are joined onto.
    pub public_base_url: String,
    /// Per-operation timeout in seconds.
    #[serde(default = "default_storage_timeout")]
    pub timeout_secs: u64,
}

fn default_storage_timeout() -> u64 {
    30
}

/// How video previews are produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PreviewStrategy {
    /// Fetch the provider-side preview image.
    #[default]
    Provider,
    /// Extract the first frame locally with ffmpeg.
    Ffmpeg,
}

/// Video preview configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct PreviewConfig {
    /// Preview strategy for video events.
    #[serde(default)]
    pub strategy: PreviewStrategy,
    /// Path to the ffmpeg executable.
    #[serde(default = "default_ffmpeg_path")]
    pub ffmpeg_path: PathBuf,
    /// Frame extraction timeout in seconds.
    #[serde(default = "default_preview_timeout")]
    pub timeout_secs: u64,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            strategy: PreviewStrategy::default(),
            ffmpeg_path: default_ffmpeg_path(),
            timeout_secs: default_preview_timeout(),
        }
    }
}

fn default_ffmpeg_path() -> PathBuf {
    PathBuf::from("ffmpeg")
}

fn default_preview_timeout() -> u64 {
    30
}

/// Webhook boundary configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookConfig {
    /// Reply 200 even when processing fails.
    #[serde(default = "default_ack_on_failure")]
    pub ack_on_failure: bool,
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            ack_on_failure: default_ack_on_failure(),
        }
    }
}

fn default_ack_on_failure() -> bool {
    true
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// Sources, lowest priority first: `config/default`, `config/{RUN_MODE}`,
    /// `EMMA__*` variables, then the legacy `CHANNEL_ACCESS_TOKEN`,
    /// `S3_MEDIA_BUCKET` and `S3_MEDIA_DOMAIN` variables.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());
        let legacy_bucket = std::env::var("S3_MEDIA_BUCKET").ok();

        let mut builder = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(
                config::Environment::with_prefix("EMMA")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option(
                "line.channel_access_token",
                std::env::var("CHANNEL_ACCESS_TOKEN").ok(),
            )?
            .set_override_option(
                "storage.public_base_url",
                std::env::var("S3_MEDIA_DOMAIN").ok(),
            )?;

        if let Some(bucket) = legacy_bucket {
            builder = builder
                .set_default("storage.provider.type", "s3")?
                .set_override("storage.provider.bucket", bucket)?;
        }

        builder.build()?.try_deserialize()
    }
}
