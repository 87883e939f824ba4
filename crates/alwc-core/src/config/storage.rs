//! Object storage configuration.

use serde::{Deserialize, Serialize};

/// Top-level storage configuration for uploaded images.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Provider to use: `"local"` or `"s3"`.
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Maximum size of one uploaded image in bytes.
    #[serde(default = "default_max_file_size")]
    pub max_file_size_bytes: usize,
    /// Maximum number of images accepted by one upload request.
    #[serde(default = "default_max_files")]
    pub max_files_per_upload: usize,
    /// Local filesystem storage configuration.
    #[serde(default)]
    pub local: LocalStorageConfig,
    /// S3-compatible object storage configuration.
    #[serde(default)]
    pub s3: S3StorageConfig,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            max_file_size_bytes: default_max_file_size(),
            max_files_per_upload: default_max_files(),
            local: LocalStorageConfig::default(),
            s3: S3StorageConfig::default(),
        }
    }
}

/// Local filesystem storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalStorageConfig {
    /// Root path for stored objects.
    #[serde(default = "default_local_root")]
    pub root_path: String,
    /// URL prefix under which stored objects are publicly reachable.
    #[serde(default = "default_public_base")]
    pub public_base_url: String,
}

impl Default for LocalStorageConfig {
    fn default() -> Self {
        Self {
            root_path: default_local_root(),
            public_base_url: default_public_base(),
        }
    }
}

/// S3-compatible object storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct S3StorageConfig {
    /// S3 bucket name.
    #[serde(default)]
    pub bucket: String,
    /// AWS region.
    #[serde(default = "default_region")]
    pub region: String,
    /// Endpoint URL for non-AWS services like MinIO.
    #[serde(default)]
    pub endpoint: Option<String>,
    /// Public URL prefix; defaults to the virtual-hosted bucket URL.
    #[serde(default)]
    pub public_base_url: Option<String>,
}

impl Default for S3StorageConfig {
    fn default() -> Self {
        Self {
            bucket: String::new(),
            region: default_region(),
            endpoint: None,
            public_base_url: None,
        }
    }
}

impl S3StorageConfig {
    /// Base URL objects in this bucket are served from.
    pub fn resolved_public_base(&self) -> String {
        match &self.public_base_url {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => format!("https://{}.s3.{}.amazonaws.com", self.bucket, self.region),
        }
    }
}

fn default_provider() -> String {
    "local".to_string()
}

fn default_max_file_size() -> usize {
    10 * 1024 * 1024
}

fn default_max_files() -> usize {
    10
}

fn default_local_root() -> String {
    "./data/uploads".to_string()
}

fn default_public_base() -> String {
    "/uploads".to_string()
}

fn default_region() -> String {
    "us-east-1".to_string()
}
