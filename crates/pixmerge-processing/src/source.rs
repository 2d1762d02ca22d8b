//! Image sources: anything that can be resolved to a decoded image.

use crate::error::SourceError;
use bytes::Bytes;
use image::{DynamicImage, ImageReader};
use std::io::Cursor;
use std::path::{Path, PathBuf};

/// Something the combiner can decode into pixels.
pub trait ImageSource {
    /// Human-readable location used in logs and error messages
    fn describe(&self) -> String;

    /// Check that the source is present without decoding it.
    fn locate(&self) -> Result<(), SourceError>;

    /// Decode the source. The format is detected from the content, not the name.
    fn decode(&self) -> Result<DynamicImage, SourceError>;
}

impl ImageSource for Path {
    fn describe(&self) -> String {
        self.display().to_string()
    }

    fn locate(&self) -> Result<(), SourceError> {
        if !self.exists() {
            return Err(SourceError::Missing {
                location: self.describe(),
            });
        }
        Ok(())
    }

    fn decode(&self) -> Result<DynamicImage, SourceError> {
        self.locate()?;
        let location = self.describe();

        let reader = ImageReader::open(self)
            .and_then(|reader| reader.with_guessed_format())
            .map_err(|source| SourceError::Read {
                location: location.clone(),
                source,
            })?;

        reader
            .decode()
            .map_err(|source| SourceError::Decode { location, source })
    }
}

impl ImageSource for str {
    fn describe(&self) -> String {
        self.to_string()
    }

    fn locate(&self) -> Result<(), SourceError> {
        Path::new(self).locate()
    }

    fn decode(&self) -> Result<DynamicImage, SourceError> {
        Path::new(self).decode()
    }
}

impl ImageSource for PathBuf {
    fn describe(&self) -> String {
        self.as_path().describe()
    }

    fn locate(&self) -> Result<(), SourceError> {
        self.as_path().locate()
    }

    fn decode(&self) -> Result<DynamicImage, SourceError> {
        self.as_path().decode()
    }
}

/// An encoded image held in memory, e.g. an upload that was never written to disk
#[derive(Debug, Clone)]
pub struct EncodedImage {
    label: String,
    data: Bytes,
}

impl EncodedImage {
    pub fn new(label: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            label: label.into(),
            data: data.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl ImageSource for EncodedImage {
    fn describe(&self) -> String {
        self.label.clone()
    }

    fn locate(&self) -> Result<(), SourceError> {
        if self.data.is_empty() {
            return Err(SourceError::Missing {
                location: self.label.clone(),
            });
        }
        Ok(())
    }

    fn decode(&self) -> Result<DynamicImage, SourceError> {
        self.locate()?;

        let reader = ImageReader::new(Cursor::new(self.data.as_ref()))
            .with_guessed_format()
            .map_err(|source| SourceError::Read {
                location: self.label.clone(),
                source,
            })?;

        reader.decode().map_err(|source| SourceError::Decode {
            location: self.label.clone(),
            source,
        })
    }
}
