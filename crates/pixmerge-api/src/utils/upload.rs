//! Common utilities for the combine upload handler

use axum::extract::Multipart;
use bytes::Bytes;
use pixmerge_core::constants::{IMAGE1_FIELD, IMAGE2_FIELD};
use pixmerge_core::AppError;

/// One uploaded image as received from the client
#[derive(Debug, Clone)]
pub struct UploadedImage {
    pub filename: String,
    pub data: Bytes,
}

/// Extract the `image1` and `image2` parts from a multipart form.
///
/// Other fields are ignored. Each image field may appear at most once, and
/// both must be present.
pub async fn extract_image_pair(
    mut multipart: Multipart,
    max_file_size: usize,
) -> Result<(UploadedImage, UploadedImage), AppError> {
    let mut image1: Option<UploadedImage> = None;
    let mut image2: Option<UploadedImage> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidInput(format!("Failed to read multipart: {}", e)))?
    {
        let field_name = field.name().map(|s| s.to_string()).unwrap_or_default();

        let slot = match field_name.as_str() {
            IMAGE1_FIELD => &mut image1,
            IMAGE2_FIELD => &mut image2,
            _ => continue,
        };

        if slot.is_some() {
            return Err(AppError::InvalidInput(format!(
                "Multiple '{}' fields are not allowed",
                field_name
            )));
        }

        let filename = field
            .file_name()
            .map(|s: &str| s.to_string())
            .unwrap_or_else(|| format!("{}.png", field_name));

        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::InvalidInput(format!("Failed to read file data: {}", e)))?;

        validate_file_size(data.len(), max_file_size)?;
        if data.is_empty() {
            return Err(AppError::InvalidInput(format!(
                "Uploaded file '{}' is empty",
                field_name
            )));
        }

        *slot = Some(UploadedImage { filename, data });
    }

    match (image1, image2) {
        (Some(first), Some(second)) => Ok((first, second)),
        _ => Err(AppError::BadRequest("Both images are required".to_string())),
    }
}

/// Validate file size
pub fn validate_file_size(file_size: usize, max_size: usize) -> Result<(), AppError> {
    if file_size > max_size {
        return Err(AppError::PayloadTooLarge(format!(
            "File size exceeds maximum allowed size of {} MB",
            max_size / 1024 / 1024
        )));
    }
    Ok(())
}

/// Sanitize filename to prevent path traversal and invalid characters.
/// Returns an error if the filename contains path traversal attempts.
pub fn sanitize_filename(filename: &str) -> Result<String, AppError> {
    const MAX_FILENAME_LENGTH: usize = 255;

    let filename_only = std::path::Path::new(filename)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(filename);

    if filename_only.contains("..") {
        return Err(AppError::InvalidInput(
            "Filename contains invalid path traversal".to_string(),
        ));
    }

    let sanitized: String = filename_only
        .chars()
        .take(MAX_FILENAME_LENGTH)
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();

    if sanitized.trim_matches(|c| c == '.' || c == '_').is_empty() || sanitized.len() < 3 {
        return Ok("file".to_string());
    }

    Ok(sanitized)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixmerge_core::ErrorMetadata;

    #[test]
    fn test_sanitize_keeps_safe_names() {
        assert_eq!(sanitize_filename("photo.png").unwrap(), "photo.png");
        assert_eq!(sanitize_filename("my-image_2.jpg").unwrap(), "my-image_2.jpg");
    }

    #[test]
    fn test_sanitize_strips_directories() {
        assert_eq!(sanitize_filename("/etc/passwd").unwrap(), "passwd");
        assert_eq!(sanitize_filename("dir/sub/pic.png").unwrap(), "pic.png");
    }

    #[test]
    fn test_sanitize_replaces_unsafe_characters() {
        assert_eq!(sanitize_filename("my photo (1).png").unwrap(), "my_photo__1_.png");
        assert_eq!(sanitize_filename("émoji.png").unwrap(), "_moji.png");
    }

    #[test]
    fn test_sanitize_short_or_empty_names() {
        assert_eq!(sanitize_filename("").unwrap(), "file");
        assert_eq!(sanitize_filename("a").unwrap(), "file");
        assert_eq!(sanitize_filename("...").unwrap_err().http_status_code(), 400);
    }

    #[test]
    fn test_sanitize_truncates_long_names() {
        let long = "a".repeat(400);
        assert_eq!(sanitize_filename(&long).unwrap().len(), 255);
    }

    #[test]
    fn test_validate_file_size() {
        assert!(validate_file_size(10, 10).is_ok());
        let err = validate_file_size(11 * 1024 * 1024, 10 * 1024 * 1024).unwrap_err();
        assert_eq!(err.http_status_code(), 413);
    }
}
