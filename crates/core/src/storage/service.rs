//! Object publisher implementation using Apache OpenDAL.

use std::time::Duration;

use emma_shared::{StorageConfig, StorageProvider};
use opendal::layers::TimeoutLayer;
use opendal::{Builder, Operator, services};
use tracing::info;

use super::error::StorageError;
use crate::media::{MediaAsset, MediaKind, StoredObject, Variant};

/// Writes media to object storage and hands back public URLs.
///
/// Writes overwrite any existing object at the same key, so publishing the
/// same `(variant, message_id)` twice leaves storage unchanged and returns
/// the same URL.
pub struct ObjectPublisher {
    operator: Operator,
    provider: StorageProvider,
    public_base_url: String,
}

impl ObjectPublisher {
    /// Create a new publisher from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage provider cannot be initialized.
    pub fn from_config(config: &StorageConfig) -> Result<Self, StorageError> {
        let timeout = Duration::from_secs(config.timeout_secs);
        let operator = Self::create_operator(&config.provider, timeout)?;
        Ok(Self {
            operator,
            provider: config.provider.clone(),
            public_base_url: config.public_base_url.clone(),
        })
    }

    /// Create OpenDAL operator from provider config.
    fn create_operator(
        provider: &StorageProvider,
        timeout: Duration,
    ) -> Result<Operator, StorageError> {
        match provider {
            StorageProvider::S3 {
                endpoint,
                bucket,
                region,
                access_key_id,
                secret_access_key,
            } => {
                let mut builder = services::S3::default().bucket(bucket).region(region);
                if let Some(endpoint) = endpoint {
                    builder = builder.endpoint(endpoint);
                }
                if let Some(key_id) = access_key_id {
                    builder = builder.access_key_id(key_id);
                }
                if let Some(secret) = secret_access_key {
                    builder = builder.secret_access_key(secret);
                }
                finish(builder, timeout)
            }
            StorageProvider::Fs { root } => {
                let builder = services::Fs::default().root(
                    root.to_str()
                        .ok_or_else(|| StorageError::configuration("invalid path"))?,
                );
                finish(builder, timeout)
            }
            StorageProvider::Memory => finish(services::Memory::default(), timeout),
        }
    }

    /// Publish an asset under the `(variant, message_id)` key.
    ///
    /// # Errors
    ///
    /// Returns `InvalidKey` for unusable message IDs and `Operation` when
    /// the storage write fails.
    pub async fn publish(
        &self,
        asset: &MediaAsset,
        kind: MediaKind,
        message_id: &str,
        variant: Variant,
    ) -> Result<StoredObject, StorageError> {
        let key = storage_key(variant, message_id, &asset.content_type)?;

        let write = self.operator.write_with(&key, asset.bytes.clone());
        if self
            .operator
            .info()
            .full_capability()
            .write_with_content_type
        {
            write.content_type(&asset.content_type).await?;
        } else {
            write.await?;
        }

        let url = public_url(&self.public_base_url, &key);
        info!(
            kind = kind.as_str(),
            key = %key,
            url = %url,
            size = asset.bytes.len(),
            "Published media object"
        );

        Ok(StoredObject {
            key,
            public_url: url,
        })
    }

    /// Get the storage provider name.
    #[must_use]
    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    /// Get the bucket name.
    #[must_use]
    pub fn bucket(&self) -> &str {
        self.provider.bucket()
    }

    /// Get the underlying operator.
    #[must_use]
    pub fn operator(&self) -> &Operator {
        &self.operator
    }
}

fn finish<B: Builder>(builder: B, timeout: Duration) -> Result<Operator, StorageError> {
    Operator::new(builder)
        .map_err(|e| StorageError::configuration(e.to_string()))?
        .layer(TimeoutLayer::new().with_timeout(timeout))
        .finish()
        .pipe(Ok)
}

/// Build the storage key for a message's media.
///
/// Format: `{variant}/{message_id}{extension}`
///
/// # Errors
///
/// Returns `InvalidKey` when the message ID is empty or contains anything
/// other than ASCII alphanumerics, hyphens and underscores.
pub fn storage_key(
    variant: Variant,
    message_id: &str,
    content_type: &str,
) -> Result<String, StorageError> {
    validate_message_id(message_id)?;
    let extension = extension_for(content_type).unwrap_or_default();
    Ok(format!("{}/{message_id}{extension}", variant.as_str()))
}

/// Join a storage key onto the public base URL.
#[must_use]
pub fn public_url(base: &str, key: &str) -> String {
    format!("{}/{key}", base.trim_end_matches('/'))
}

/// File extension (with leading dot) for a content type, if one is known.
#[must_use]
pub fn extension_for(content_type: &str) -> Option<String> {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    let extension = match essence.as_str() {
        "image/jpeg" => "jpg",
        "image/png" => "png",
        "image/gif" => "gif",
        "image/webp" => "webp",
        "video/mp4" => "mp4",
        "video/quicktime" => "mov",
        "" | "application/octet-stream" => return None,
        other => *mime_guess::get_mime_extensions_str(other)?.first()?,
    };

    Some(format!(".{extension}"))
}

/// Keys must stay collision-free, so IDs are rejected rather than rewritten.
fn validate_message_id(message_id: &str) -> Result<(), StorageError> {
    if message_id.is_empty() {
        return Err(StorageError::invalid_key("empty message id"));
    }
    if !message_id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(StorageError::invalid_key(format!(
            "unsupported characters in message id '{message_id}'"
        )));
    }
    Ok(())
}

/// Extension trait for pipe operator.
trait Pipe: Sized {
    fn pipe<F, R>(self, f: F) -> R
    where
        F: FnOnce(Self) -> R,
    {
        f(self)
    }
}

impl<T> Pipe for T {}
