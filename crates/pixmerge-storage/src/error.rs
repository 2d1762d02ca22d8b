use std::io;
use thiserror::Error;

/// Failures of the upload and output directories
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to store {key}: {source}")]
    Write {
        key: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to read {key}: {source}")]
    Read {
        key: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to remove {key}: {source}")]
    Remove {
        key: String,
        #[source]
        source: io::Error,
    },

    /// No file with this name in the directory
    #[error("no stored file named {0}")]
    NotFound(String),

    /// Name that could resolve outside the directory
    #[error("invalid file name: {0}")]
    InvalidKey(String),

    #[error("storage directory {path} is unavailable: {source}")]
    DirectoryUnavailable {
        path: String,
        #[source]
        source: io::Error,
    },
}

impl StorageError {
    /// File name (storage key) the failure concerns, when there is one
    pub fn key(&self) -> Option<&str> {
        match self {
            StorageError::Write { key, .. }
            | StorageError::Read { key, .. }
            | StorageError::Remove { key, .. } => Some(key),
            StorageError::NotFound(key) => Some(key),
            StorageError::InvalidKey(_) | StorageError::DirectoryUnavailable { .. } => None,
        }
    }
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_file() {
        let err = StorageError::Write {
            key: "abc_image1_1.png".to_string(),
            source: io::Error::other("disk full"),
        };
        assert_eq!(err.to_string(), "failed to store abc_image1_1.png: disk full");
        assert_eq!(err.key(), Some("abc_image1_1.png"));

        let err = StorageError::NotFound("xor_result.png".to_string());
        assert_eq!(err.to_string(), "no stored file named xor_result.png");
        assert_eq!(err.key(), Some("xor_result.png"));
    }

    #[test]
    fn test_directory_errors_have_no_key() {
        let err = StorageError::DirectoryUnavailable {
            path: "output".to_string(),
            source: io::Error::new(io::ErrorKind::NotFound, "gone"),
        };
        assert_eq!(err.key(), None);
        assert!(err.to_string().starts_with("storage directory output is unavailable"));
    }
}
