//! Multipart image uploads.

use axum::extract::Multipart;
use axum::extract::multipart::MultipartRejection;

use alwc_core::error::AppError;
use alwc_service::UploadedFile;

/// Buffer every file sent under `field_name`; other fields are skipped.
/// Size and type limits are enforced by the services.
pub async fn collect_files(
    multipart: Result<Multipart, MultipartRejection>,
    field_name: &str,
) -> Result<Vec<UploadedFile>, AppError> {
    let mut multipart = multipart.map_err(|e| AppError::validation(e.body_text()))?;

    let mut files = Vec::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(e.body_text()))?
    {
        if field.name() != Some(field_name) {
            continue;
        }
        let file_name = field.file_name().map(str::to_string);
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::validation(e.body_text()))?;
        files.push(UploadedFile {
            file_name,
            content_type,
            data,
        });
    }
    Ok(files)
}
