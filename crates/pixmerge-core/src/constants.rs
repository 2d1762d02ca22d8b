//! Shared constants.

/// Route prefix under which combination results are served.
pub const OUTPUT_ROUTE: &str = "/output";

/// Multipart field carrying the authoritative (first) image.
pub const IMAGE1_FIELD: &str = "image1";

/// Multipart field carrying the second image, resized to match the first.
pub const IMAGE2_FIELD: &str = "image2";

pub const DEFAULT_PORT: u16 = 5001;
pub const DEFAULT_UPLOAD_DIR: &str = "uploads";
pub const DEFAULT_OUTPUT_DIR: &str = "output";
