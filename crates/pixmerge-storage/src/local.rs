use crate::error::{StorageError, StorageResult};
use bytes::Bytes;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Local filesystem storage rooted at a single flat directory
#[derive(Clone, Debug)]
pub struct LocalStorage {
    base_path: PathBuf,
    base_url: String,
}

impl LocalStorage {
    /// Create a new LocalStorage instance, creating the directory if absent
    ///
    /// # Arguments
    /// * `base_path` - Root directory for file storage (e.g., "output")
    /// * `base_url` - Base URL for serving files (e.g., "http://localhost:5001/output")
    pub async fn new(base_path: impl Into<PathBuf>, base_url: String) -> StorageResult<Self> {
        let base_path = base_path.into();

        fs::create_dir_all(&base_path)
            .await
            .map_err(|source| StorageError::DirectoryUnavailable {
                path: base_path.display().to_string(),
                source,
            })?;

        Ok(LocalStorage {
            base_path,
            base_url,
        })
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Convert storage key to filesystem path with security validation
    ///
    /// Keys are single file names; anything that could escape the storage
    /// directory is rejected.
    pub fn path_for(&self, storage_key: &str) -> StorageResult<PathBuf> {
        if storage_key.is_empty()
            || storage_key.contains("..")
            || storage_key.starts_with('/')
            || storage_key.contains('/')
            || storage_key.contains('\\')
        {
            return Err(StorageError::InvalidKey(
                "Storage key contains invalid characters".to_string(),
            ));
        }

        let path = self.base_path.join(storage_key);

        if let (Ok(base_canonical), Ok(canonical)) =
            (self.base_path.canonicalize(), path.canonicalize())
        {
            if canonical.strip_prefix(&base_canonical).is_err() {
                return Err(StorageError::InvalidKey(
                    "Storage key resolves outside storage directory".to_string(),
                ));
            }
        }

        Ok(path)
    }

    /// Public URL for a stored file
    pub fn url_for(&self, storage_key: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), storage_key)
    }

    /// Write data under a specific storage key, replacing any previous file.
    /// Returns the public URL for the stored file.
    pub async fn upload_with_key(&self, storage_key: &str, data: Bytes) -> StorageResult<String> {
        let path = self.path_for(storage_key)?;
        let size = data.len();

        let start = std::time::Instant::now();

        let write_error = |source: std::io::Error| StorageError::Write {
            key: storage_key.to_string(),
            source,
        };

        let mut file = fs::File::create(&path).await.map_err(write_error)?;
        file.write_all(&data).await.map_err(write_error)?;
        file.sync_all().await.map_err(write_error)?;

        tracing::debug!(
            path = %path.display(),
            key = %storage_key,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage write successful"
        );

        Ok(self.url_for(storage_key))
    }

    /// Read a stored file by its key
    pub async fn download(&self, storage_key: &str) -> StorageResult<Vec<u8>> {
        let path = self.path_for(storage_key)?;

        if !fs::try_exists(&path).await.unwrap_or(false) {
            return Err(StorageError::NotFound(storage_key.to_string()));
        }

        let data = fs::read(&path)
            .await
            .map_err(|source| StorageError::Read {
                key: storage_key.to_string(),
                source,
            })?;

        tracing::debug!(
            path = %path.display(),
            key = %storage_key,
            size_bytes = data.len(),
            "Local storage read successful"
        );

        Ok(data)
    }

    /// Delete a stored file; deleting a missing file is not an error
    pub async fn delete(&self, storage_key: &str) -> StorageResult<()> {
        let path = self.path_for(storage_key)?;

        match fs::remove_file(&path).await {
            Ok(()) => {
                tracing::debug!(key = %storage_key, "Local storage delete successful");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StorageError::Remove {
                key: storage_key.to_string(),
                source,
            }),
        }
    }

    pub async fn exists(&self, storage_key: &str) -> StorageResult<bool> {
        let path = self.path_for(storage_key)?;
        Ok(fs::try_exists(&path).await.unwrap_or(false))
    }

    /// Check that the storage directory is still present and is a directory
    pub async fn check_health(&self) -> StorageResult<()> {
        let unavailable = |source: std::io::Error| StorageError::DirectoryUnavailable {
            path: self.base_path.display().to_string(),
            source,
        };

        let metadata = fs::metadata(&self.base_path).await.map_err(unavailable)?;
        if !metadata.is_dir() {
            return Err(unavailable(std::io::Error::other("not a directory")));
        }
        Ok(())
    }
}
