//! Image sinks: destinations for named output artifacts.

use crate::error::SinkError;
use image::{ImageFormat, RgbImage};
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};

/// Destination for the combiner's output artifacts.
pub trait ImageSink {
    /// Human-readable destination used in logs
    fn describe(&self) -> String;

    /// Make the destination ready to receive artifacts. Must be idempotent.
    fn prepare(&self) -> Result<(), SinkError>;

    /// Persist one artifact under `name`, replacing any previous artifact of
    /// that name. Returns where it was written.
    fn write(&self, name: &str, image: &RgbImage) -> Result<PathBuf, SinkError>;
}

/// Writes PNG files into a flat directory.
///
/// Each file is encoded in memory, written to a temporary file in the same
/// directory and renamed into place, so readers never observe a half-written
/// result and concurrent writers of one name leave the last complete file.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl ImageSink for DirectorySink {
    fn describe(&self) -> String {
        self.dir.display().to_string()
    }

    fn prepare(&self) -> Result<(), SinkError> {
        std::fs::create_dir_all(&self.dir).map_err(|source| SinkError::Prepare {
            path: self.describe(),
            source,
        })
    }

    fn write(&self, name: &str, image: &RgbImage) -> Result<PathBuf, SinkError> {
        let path = self.dir.join(name);

        let mut encoded = Vec::with_capacity(image.width() as usize * image.height() as usize * 3);
        image
            .write_to(&mut Cursor::new(&mut encoded), ImageFormat::Png)
            .map_err(|source| SinkError::Encode {
                name: name.to_string(),
                source,
            })?;

        let write_error = |source: std::io::Error| SinkError::Write {
            path: path.display().to_string(),
            source,
        };

        let mut staged = tempfile::Builder::new()
            .prefix(".pixmerge-")
            .suffix(".tmp")
            .tempfile_in(&self.dir)
            .map_err(write_error)?;
        staged.write_all(&encoded).map_err(write_error)?;
        staged.as_file().sync_all().map_err(write_error)?;
        staged
            .persist(&path)
            .map_err(|persist| write_error(persist.error))?;

        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn test_prepare_creates_directory_idempotently() {
        let dir = tempfile::tempdir().unwrap();
        let sink = DirectorySink::new(dir.path().join("nested").join("output"));

        sink.prepare().unwrap();
        sink.prepare().unwrap();
        assert!(sink.dir().is_dir());
    }

    #[test]
    fn test_write_png_and_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let sink = DirectorySink::new(dir.path());
        sink.prepare().unwrap();

        let first = RgbImage::from_pixel(2, 2, Rgb([1, 2, 3]));
        let path = sink.write("xor_result.png", &first).unwrap();
        assert_eq!(path, dir.path().join("xor_result.png"));

        let second = RgbImage::from_pixel(2, 2, Rgb([9, 8, 7]));
        sink.write("xor_result.png", &second).unwrap();

        let reloaded = image::open(&path).unwrap().into_rgb8();
        assert_eq!(reloaded, second);

        // Only the final file remains, no staging leftovers
        let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_write_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let sink = DirectorySink::new(dir.path().join("never-created"));

        let err = sink
            .write("and_result.png", &RgbImage::new(1, 1))
            .unwrap_err();
        assert!(matches!(err, SinkError::Write { .. }));
    }

    #[test]
    fn test_prepare_fails_when_path_is_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("output");
        std::fs::write(&blocker, b"file").unwrap();

        let sink = DirectorySink::new(&blocker);
        assert!(matches!(sink.prepare(), Err(SinkError::Prepare { .. })));
    }
}
