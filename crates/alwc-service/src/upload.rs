//! Uploaded image files.

use bytes::Bytes;

use alwc_core::config::storage::StorageConfig;
use alwc_core::error::AppError;

/// One file from a multipart upload, fully buffered.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: Option<String>,
    pub content_type: String,
    pub data: Bytes,
}

impl UploadedFile {
    pub fn is_image(&self) -> bool {
        self.content_type.starts_with("image/")
    }
}

/// Limits applied to every upload.
#[derive(Debug, Clone, Copy)]
pub struct UploadLimits {
    pub max_file_size: usize,
    pub max_files: usize,
}

impl UploadLimits {
    pub fn from_config(config: &StorageConfig) -> Self {
        Self {
            max_file_size: config.max_file_size_bytes,
            max_files: config.max_files_per_upload,
        }
    }

    pub fn check(&self, files: &[UploadedFile]) -> Result<(), AppError> {
        if files.is_empty() {
            return Err(AppError::validation("No files uploaded"));
        }
        if files.len() > self.max_files {
            return Err(AppError::validation(format!(
                "Too many files; at most {} per upload",
                self.max_files
            )));
        }
        for file in files {
            if !file.is_image() {
                return Err(AppError::validation("Only image files are allowed"));
            }
            if file.data.len() > self.max_file_size {
                return Err(AppError::validation(format!(
                    "File too large; limit is {} MB",
                    self.max_file_size / (1024 * 1024)
                )));
            }
        }
        Ok(())
    }
}

impl Default for UploadLimits {
    fn default() -> Self {
        Self::from_config(&StorageConfig::default())
    }
}
