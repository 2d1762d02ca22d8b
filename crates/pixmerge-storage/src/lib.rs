//! Pixmerge Storage Library
//!
//! Flat-file storage for uploaded inputs and combination outputs.
//!
//! # Storage key format
//!
//! Keys are plain file names relative to the storage root. Uploaded inputs use
//! `{request_id}_{slot}_{filename}` so concurrent requests never share a file;
//! combination outputs use the fixed `<op>_result.png` names.
//!
//! Keys must not contain `..`, path separators, or a leading `/`.

pub mod error;
pub mod keys;
pub mod local;

// Re-export commonly used types
pub use error::{StorageError, StorageResult};
pub use keys::generate_upload_key;
pub use local::LocalStorage;
