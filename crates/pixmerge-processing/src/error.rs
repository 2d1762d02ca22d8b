//! Combiner error types
//!
//! Failures are tracked with their precise kind inside the pipeline
//! (`SourceError`, `SinkError`, `OperationError`, `CombineError`) and collapse
//! into a single `CombinationError` at the component boundary.

use crate::combine::BlendOperation;
use std::io;
use thiserror::Error;

/// Failure to turn an image source into pixels
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("not found at: {location}")]
    Missing { location: String },

    #[error("could not be read from {location}: {source}")]
    Read {
        location: String,
        #[source]
        source: io::Error,
    },

    #[error("could not be decoded from {location}: {source}")]
    Decode {
        location: String,
        #[source]
        source: image::ImageError,
    },
}

/// Failure to persist an output artifact
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("failed to create output directory {path}: {source}")]
    Prepare {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to encode {name}: {source}")]
    Encode {
        name: String,
        #[source]
        source: image::ImageError,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: io::Error,
    },
}

/// Failure of a single operator, while computing or while saving its result
#[derive(Debug, Error)]
pub enum OperationError {
    #[error(
        "image shapes differ: {left_width}x{left_height} vs {right_width}x{right_height}"
    )]
    ShapeMismatch {
        left_width: u32,
        left_height: u32,
        right_width: u32,
        right_height: u32,
    },

    #[error(transparent)]
    Sink(#[from] SinkError),
}

/// Any failure inside the decode, normalize, compute and write pipeline
#[derive(Debug, Error)]
pub enum CombineError {
    /// `index` is 1 for the first image, 2 for the second
    #[error("Image {index} {source}")]
    Input {
        index: u8,
        #[source]
        source: SourceError,
    },

    #[error(transparent)]
    Output(SinkError),

    #[error("Error in {operation} operation: {source}")]
    Operation {
        operation: BlendOperation,
        #[source]
        source: OperationError,
    },
}

impl CombineError {
    /// True when an input could not be located at all
    pub fn is_missing_input(&self) -> bool {
        matches!(
            self,
            CombineError::Input {
                source: SourceError::Missing { .. },
                ..
            }
        )
    }

    /// True when an input exists but is not an image
    pub fn is_decode_failure(&self) -> bool {
        matches!(
            self,
            CombineError::Input {
                source: SourceError::Decode { .. },
                ..
            }
        )
    }

    /// The operation that failed, if the failure happened in the operator loop
    pub fn operation(&self) -> Option<BlendOperation> {
        match self {
            CombineError::Operation { operation, .. } => Some(*operation),
            _ => None,
        }
    }
}

/// The single failure signal of the image combiner
#[derive(Debug, Error)]
#[error("Error processing images: {source}")]
pub struct CombinationError {
    #[from]
    source: CombineError,
}

impl CombinationError {
    /// Human-readable description of the underlying cause
    pub fn message(&self) -> String {
        self.to_string()
    }

    pub fn cause(&self) -> &CombineError {
        &self.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_input_message() {
        let err = CombinationError::from(CombineError::Input {
            index: 1,
            source: SourceError::Missing {
                location: "uploads/a.png".to_string(),
            },
        });
        assert_eq!(
            err.message(),
            "Error processing images: Image 1 not found at: uploads/a.png"
        );
        assert!(err.cause().is_missing_input());
        assert!(!err.cause().is_decode_failure());
        assert_eq!(err.cause().operation(), None);
    }

    #[test]
    fn test_operation_error_message() {
        let err = CombinationError::from(CombineError::Operation {
            operation: BlendOperation::Avg,
            source: OperationError::ShapeMismatch {
                left_width: 2,
                left_height: 2,
                right_width: 3,
                right_height: 1,
            },
        });
        assert_eq!(
            err.message(),
            "Error processing images: Error in avg operation: image shapes differ: 2x2 vs 3x1"
        );
        assert_eq!(err.cause().operation(), Some(BlendOperation::Avg));
    }

    #[test]
    fn test_error_chain_preserved() {
        use std::error::Error as _;

        let io = io::Error::new(io::ErrorKind::PermissionDenied, "read-only");
        let err = CombinationError::from(CombineError::Operation {
            operation: BlendOperation::Or,
            source: OperationError::Sink(SinkError::Write {
                path: "output/or_result.png".to_string(),
                source: io,
            }),
        });

        let cause = err.source().unwrap();
        assert!(cause.to_string().starts_with("Error in or operation"));
        assert!(err.message().contains("read-only"));
    }
}
