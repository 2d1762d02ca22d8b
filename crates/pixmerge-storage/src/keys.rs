//! Key generation for stored uploads.

use uuid::Uuid;

/// Generate the storage key for one uploaded input of a request.
///
/// `slot` is the multipart field the file arrived in (`image1`/`image2`), so the two
/// inputs of one request stay distinct even when the client sends the same file name.
/// `filename` must already be sanitized.
pub fn generate_upload_key(request_id: Uuid, slot: &str, filename: &str) -> String {
    format!("{}_{}_{}", request_id.simple(), slot, filename)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_keys_are_distinct_per_slot() {
        let request_id = Uuid::new_v4();
        let a = generate_upload_key(request_id, "image1", "photo.png");
        let b = generate_upload_key(request_id, "image2", "photo.png");
        assert_ne!(a, b);
        assert!(a.ends_with("_image1_photo.png"));
        assert!(!a.contains('-'));
    }

    #[test]
    fn test_upload_keys_are_distinct_per_request() {
        let a = generate_upload_key(Uuid::new_v4(), "image1", "photo.png");
        let b = generate_upload_key(Uuid::new_v4(), "image1", "photo.png");
        assert_ne!(a, b);
    }
}
