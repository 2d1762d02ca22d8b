//! Image combiner - runs the decode, normalize, compute, write pipeline
//!
//! One call decodes both inputs, converts them to RGB, resizes the second to the
//! first's dimensions and then writes one artifact per `BlendOperation`. Any
//! failure aborts the remaining steps and is returned as a `CombinationError`.

use crate::combine::normalize::normalize_pair;
use crate::combine::operation::BlendOperation;
use crate::error::{CombinationError, CombineError, OperationError};
use crate::sink::{DirectorySink, ImageSink};
use crate::source::ImageSource;
use image::RgbImage;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// One persisted operation result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputArtifact {
    pub operation: BlendOperation,
    pub name: String,
    pub path: PathBuf,
}

/// Result of a successful combination
#[derive(Debug, Clone)]
pub struct CombinationOutput {
    /// Dimensions of every artifact, taken from the first input
    pub width: u32,
    pub height: u32,
    /// Artifacts in the order they were written
    pub artifacts: Vec<OutputArtifact>,
}

impl CombinationOutput {
    pub fn artifact(&self, operation: BlendOperation) -> Option<&OutputArtifact> {
        self.artifacts.iter().find(|a| a.operation == operation)
    }
}

/// Combines two images with every `BlendOperation`
pub struct ImageCombiner;

impl ImageCombiner {
    /// Decode both sources and normalize them to one shape.
    ///
    /// Both inputs are located before either is decoded, and both are decoded
    /// before anything is written anywhere, so a bad input never produces output.
    pub fn load_pair(
        first: &dyn ImageSource,
        second: &dyn ImageSource,
    ) -> Result<(RgbImage, RgbImage), CombineError> {
        first
            .locate()
            .map_err(|source| CombineError::Input { index: 1, source })?;
        second
            .locate()
            .map_err(|source| CombineError::Input { index: 2, source })?;

        let img1 = first
            .decode()
            .map_err(|source| CombineError::Input { index: 1, source })?;
        let img2 = second
            .decode()
            .map_err(|source| CombineError::Input { index: 2, source })?;

        tracing::debug!(
            image1_width = img1.width(),
            image1_height = img1.height(),
            image2_width = img2.width(),
            image2_height = img2.height(),
            "Decoded input images"
        );

        Ok(normalize_pair(img1, img2))
    }

    /// Run every operation over a normalized pair and hand each result to the sink.
    ///
    /// Stops at the first failing operation; artifacts written before it stay in place.
    pub fn write_all(
        a: &RgbImage,
        b: &RgbImage,
        sink: &dyn ImageSink,
    ) -> Result<Vec<OutputArtifact>, CombineError> {
        let mut artifacts = Vec::with_capacity(BlendOperation::ALL.len());

        for operation in BlendOperation::ALL {
            let start = Instant::now();
            let name = operation.output_filename();

            let path = operation
                .apply(a, b)
                .and_then(|result| sink.write(&name, &result).map_err(OperationError::from))
                .map_err(|source| {
                    tracing::error!(operation = %operation, error = %source, "Operation failed");
                    CombineError::Operation { operation, source }
                })?;

            tracing::debug!(
                operation = %operation,
                path = %path.display(),
                duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                "Saved operation result"
            );

            artifacts.push(OutputArtifact {
                operation,
                name,
                path,
            });
        }

        Ok(artifacts)
    }

    /// Combine two image sources into the sink.
    pub fn combine(
        first: &dyn ImageSource,
        second: &dyn ImageSource,
        sink: &dyn ImageSink,
    ) -> Result<CombinationOutput, CombinationError> {
        let start = Instant::now();
        tracing::info!(
            image1 = %first.describe(),
            image2 = %second.describe(),
            output = %sink.describe(),
            "Starting image combination"
        );

        let result = Self::run(first, second, sink);

        match &result {
            Ok(output) => tracing::info!(
                width = output.width,
                height = output.height,
                artifacts = output.artifacts.len(),
                duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                "All operations completed successfully"
            ),
            Err(e) => tracing::warn!(error = %e, "Image combination failed"),
        }

        result.map_err(CombinationError::from)
    }

    fn run(
        first: &dyn ImageSource,
        second: &dyn ImageSource,
        sink: &dyn ImageSink,
    ) -> Result<CombinationOutput, CombineError> {
        sink.prepare().map_err(CombineError::Output)?;

        let (a, b) = Self::load_pair(first, second)?;
        let artifacts = Self::write_all(&a, &b, sink)?;

        Ok(CombinationOutput {
            width: a.width(),
            height: a.height(),
            artifacts,
        })
    }
}

/// Combine the images at two paths, writing `<op>_result.png` files into `output_dir`.
///
/// The output directory is created if needed. The second image is resized to the
/// first image's dimensions when they differ.
pub fn combine_images(
    image1_path: impl AsRef<Path>,
    image2_path: impl AsRef<Path>,
    output_dir: impl AsRef<Path>,
) -> Result<CombinationOutput, CombinationError> {
    let image1 = image1_path.as_ref().to_path_buf();
    let image2 = image2_path.as_ref().to_path_buf();
    let sink = DirectorySink::new(output_dir.as_ref());
    ImageCombiner::combine(&image1, &image2, &sink)
}
