//! Image combination
//!
//! - Normalization of two inputs to one RGB shape (normalize)
//! - The fixed operator set (operation)
//! - The decode, normalize, compute, write pipeline (combiner)

pub mod combiner;
pub mod normalize;
pub mod operation;

pub use combiner::{combine_images, CombinationOutput, ImageCombiner, OutputArtifact};
pub use normalize::{match_dimensions, normalize_pair, RESIZE_FILTER};
pub use operation::BlendOperation;
