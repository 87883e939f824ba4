//! Object storage trait for uploaded images.

use async_trait::async_trait;
use bytes::Bytes;

use crate::result::AppResult;

/// Trait for blob storage backends holding publicly served images.
///
/// Implementations exist for the local filesystem and S3. The trait is
/// defined here in `alwc-core` and implemented in `alwc-storage`.
#[async_trait]
pub trait ObjectStore: Send + Sync + std::fmt::Debug + 'static {
    /// Return the provider type name (e.g., "local", "s3").
    fn provider_type(&self) -> &str;

    /// Check whether the backend is reachable.
    async fn health_check(&self) -> AppResult<bool>;

    /// Store `data` under `key` and return the public URL of the object.
    async fn put(&self, key: &str, data: Bytes, content_type: &str) -> AppResult<String>;

    /// Remove the object under `key`. Missing objects are not an error.
    async fn delete(&self, key: &str) -> AppResult<()>;

    /// Recover the storage key from a public URL produced by [`put`].
    ///
    /// [`put`]: ObjectStore::put
    fn key_for_url(&self, url: &str) -> Option<String>;
}
