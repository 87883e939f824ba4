//! Builds the configured object store.

use std::sync::Arc;

use tracing::info;

use alwc_core::config::storage::StorageConfig;
use alwc_core::error::AppError;
use alwc_core::result::AppResult;
use alwc_core::traits::object_store::ObjectStore;

use crate::providers::LocalObjectStore;

/// Construct the provider named by `storage.provider`.
pub async fn build_object_store(config: &StorageConfig) -> AppResult<Arc<dyn ObjectStore>> {
    match config.provider.as_str() {
        "local" => {
            let store =
                LocalObjectStore::new(&config.local.root_path, &config.local.public_base_url)
                    .await?;
            info!(root = %config.local.root_path, "Using local object store");
            Ok(Arc::new(store))
        }
        #[cfg(feature = "s3")]
        "s3" => Ok(Arc::new(crate::providers::S3ObjectStore::new(&config.s3).await?)),
        other => Err(AppError::misconfigured(format!(
            "Unsupported storage provider: {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unknown_provider_is_misconfigured() {
        let config = StorageConfig {
            provider: "ftp".to_string(),
            ..Default::default()
        };
        let err = build_object_store(&config).await.unwrap_err();
        assert_eq!(err.kind, alwc_core::error::ErrorKind::Misconfigured);
    }

    #[tokio::test]
    async fn test_local_provider() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = StorageConfig::default();
        config.local.root_path = dir.path().to_string_lossy().into_owned();
        let store = build_object_store(&config).await.unwrap();
        assert_eq!(store.provider_type(), "local");
        assert!(store.health_check().await.unwrap());
    }
}
