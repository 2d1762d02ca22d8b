//! Pixmerge Image Processing Library
//!
//! This crate provides the image combiner: two decoded images are normalized to a
//! common RGB shape and merged pixel by pixel with eight fixed operators (xor, add,
//! sub, avg, max, min, and, or), each result persisted as `<op>_result.png`.

pub mod combine;
pub mod error;
pub mod sink;
pub mod source;

// Re-export commonly used types
pub use combine::{
    combine_images, normalize_pair, BlendOperation, CombinationOutput, ImageCombiner,
    OutputArtifact,
};
pub use error::{CombinationError, CombineError, OperationError, SinkError, SourceError};
pub use sink::{DirectorySink, ImageSink};
pub use source::{EncodedImage, ImageSource};
