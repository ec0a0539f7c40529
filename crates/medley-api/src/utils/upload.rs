//! Common utilities for the file upload handler

use axum::extract::Multipart;
use chrono::Utc;
use medley_core::constants::{
    AUDIO_EXTENSIONS, IMAGE_EXTENSIONS, MAX_UPLOAD_SIZE_BYTES, VIDEO_EXTENSIONS,
};
use medley_core::models::FileKind;
use medley_core::AppError;

/// Extract file data, filename, and content type from a multipart form.
/// The first field named "file" wins; remaining fields are not read.
pub async fn extract_multipart_file(
    mut multipart: Multipart,
) -> Result<(Vec<u8>, String, String), AppError> {
    let mut file_data: Option<Vec<u8>> = None;
    let mut filename: Option<String> = None;
    let mut content_type: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidInput(format!("Failed to read multipart: {}", e)))?
    {
        let field_name = field.name().map(|s| s.to_string()).unwrap_or_default();

        if field_name == "file" {
            filename = field.file_name().map(|s: &str| s.to_string());
            content_type = field.content_type().map(|s: &str| s.to_string());

            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::InvalidInput(format!("Failed to read file data: {}", e)))?;

            file_data = Some(data.to_vec());
            break;
        }
    }

    let file_data =
        file_data.ok_or_else(|| AppError::InvalidInput("No file provided".to_string()))?;

    let original_filename = filename.unwrap_or_else(|| "unknown".to_string());
    let content_type = content_type.unwrap_or_else(|| "application/octet-stream".to_string());

    Ok((file_data, original_filename, content_type))
}

/// Validate file size
pub fn validate_file_size(file_size: usize, max_size: usize) -> Result<(), AppError> {
    if file_size > max_size {
        return Err(AppError::InvalidInput(format!(
            "File size exceeds {}MB limit. Your file is {:.2}MB",
            max_size / 1024 / 1024,
            file_size as f64 / (1024.0 * 1024.0)
        )));
    }
    Ok(())
}

/// Validate the file extension against the allowed media extensions and
/// classify the file. The extension is everything from the last dot onward;
/// a name without a dot is compared whole (and so never matches).
pub fn validate_file_extension(filename: &str) -> Result<FileKind, AppError> {
    let lowered = filename.to_lowercase();
    let extension = match lowered.rfind('.') {
        Some(idx) => &lowered[idx..],
        None => lowered.as_str(),
    };

    FileKind::from_allowed_extension(extension).ok_or_else(|| {
        AppError::InvalidInput(format!(
            "File type not allowed. Allowed extensions: Images: {} Videos: {} Audio: {}",
            IMAGE_EXTENSIONS.join(", "),
            VIDEO_EXTENSIONS.join(", "),
            AUDIO_EXTENSIONS.join(", ")
        ))
    })
}

/// Sanitize a filename for use inside a storage key. Anything outside ASCII
/// alphanumerics, dots, and hyphens becomes an underscore.
pub fn sanitize_file_name(filename: &str) -> String {
    filename
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Build the storage key for a new upload: epoch millis, a hyphen, and the
/// sanitized original name. The timestamp prefix keeps repeat uploads of the
/// same file distinct.
pub fn timestamped_key(sanitized_name: &str) -> String {
    format!("{}-{}", Utc::now().timestamp_millis(), sanitized_name)
}
