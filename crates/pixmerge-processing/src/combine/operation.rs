//! The fixed set of pixel-wise operators.

use crate::error::OperationError;
use image::{Pixel, Rgb, RgbImage};
use imageproc::map::map_colors2;
use std::fmt;
use std::str::FromStr;

/// A pure pixel-wise binary function over two same-shaped RGB images.
///
/// Every variant works channel by channel on 8-bit values and never wraps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlendOperation {
    /// `a ^ b`
    Xor,
    /// `min(a + b, 255)`
    Add,
    /// `|a - b|`
    Sub,
    /// `floor((a + b) / 2)`
    Avg,
    /// `max(a, b)`
    Max,
    /// `min(a, b)`
    Min,
    /// `a & b`
    And,
    /// `a | b`
    Or,
}

impl BlendOperation {
    /// All operations, in the order results are produced.
    pub const ALL: [BlendOperation; 8] = [
        BlendOperation::Xor,
        BlendOperation::Add,
        BlendOperation::Sub,
        BlendOperation::Avg,
        BlendOperation::Max,
        BlendOperation::Min,
        BlendOperation::And,
        BlendOperation::Or,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            BlendOperation::Xor => "xor",
            BlendOperation::Add => "add",
            BlendOperation::Sub => "sub",
            BlendOperation::Avg => "avg",
            BlendOperation::Max => "max",
            BlendOperation::Min => "min",
            BlendOperation::And => "and",
            BlendOperation::Or => "or",
        }
    }

    /// File name the result is stored under, e.g. `xor_result.png`
    pub fn output_filename(self) -> String {
        format!("{}_result.png", self.name())
    }

    /// Key the result is reported under, e.g. `xor_result`
    pub fn result_key(self) -> String {
        format!("{}_result", self.name())
    }

    /// Combine one channel value of each image.
    #[inline]
    pub fn apply_channel(self, a: u8, b: u8) -> u8 {
        match self {
            BlendOperation::Xor => a ^ b,
            BlendOperation::Add => a.saturating_add(b),
            BlendOperation::Sub => a.abs_diff(b),
            BlendOperation::Avg => ((u16::from(a) + u16::from(b)) / 2) as u8,
            BlendOperation::Max => a.max(b),
            BlendOperation::Min => a.min(b),
            BlendOperation::And => a & b,
            BlendOperation::Or => a | b,
        }
    }

    /// Apply the operation over two full images of identical dimensions.
    pub fn apply(self, a: &RgbImage, b: &RgbImage) -> Result<RgbImage, OperationError> {
        if a.dimensions() != b.dimensions() {
            return Err(OperationError::ShapeMismatch {
                left_width: a.width(),
                left_height: a.height(),
                right_width: b.width(),
                right_height: b.height(),
            });
        }

        Ok(map_colors2(a, b, |p: Rgb<u8>, q: Rgb<u8>| {
            p.map2(&q, |x, y| self.apply_channel(x, y))
        }))
    }
}

impl fmt::Display for BlendOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BlendOperation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        BlendOperation::ALL
            .into_iter()
            .find(|op| op.name() == wanted)
            .ok_or_else(|| format!("Unknown operation: {}", s))
    }
}
