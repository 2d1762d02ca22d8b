//! Bring two arbitrary images to one RGB shape.

use image::imageops::{self, FilterType};
use image::{DynamicImage, RgbImage};

/// Resampling filter used when the second image has to be resized.
pub const RESIZE_FILTER: FilterType = FilterType::Lanczos3;

/// Convert both images to 8-bit RGB and resize the second to the first's dimensions.
///
/// The conversion happens even for images that are already RGB; alpha is dropped
/// and grayscale/palette images are expanded. The first image is never resized.
pub fn normalize_pair(first: DynamicImage, second: DynamicImage) -> (RgbImage, RgbImage) {
    let first = first.into_rgb8();
    let second = match_dimensions(&first, second.into_rgb8());
    (first, second)
}

/// Resize `image` to the dimensions of `reference` if they differ.
pub fn match_dimensions(reference: &RgbImage, image: RgbImage) -> RgbImage {
    let (width, height) = reference.dimensions();
    if image.dimensions() == (width, height) {
        return image;
    }

    tracing::debug!(
        from_width = image.width(),
        from_height = image.height(),
        to_width = width,
        to_height = height,
        "Resizing image 2 to match image 1"
    );
    imageops::resize(&image, width, height, RESIZE_FILTER)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma, Rgb, Rgba, RgbaImage};

    #[test]
    fn test_second_resized_to_first() {
        let first = DynamicImage::ImageRgb8(RgbImage::from_pixel(100, 100, Rgb([10, 20, 30])));
        let second = DynamicImage::ImageRgb8(RgbImage::from_pixel(50, 50, Rgb([40, 50, 60])));

        let (a, b) = normalize_pair(first, second);
        assert_eq!(a.dimensions(), (100, 100));
        assert_eq!(b.dimensions(), (100, 100));
    }

    #[test]
    fn test_first_is_authoritative_when_smaller() {
        let first = DynamicImage::ImageRgb8(RgbImage::new(4, 3));
        let second = DynamicImage::ImageRgb8(RgbImage::new(40, 30));

        let (a, b) = normalize_pair(first, second);
        assert_eq!(a.dimensions(), (4, 3));
        assert_eq!(b.dimensions(), (4, 3));
    }

    #[test]
    fn test_uniform_image_survives_resize() {
        let reference = RgbImage::new(8, 8);
        let image = RgbImage::from_pixel(3, 5, Rgb([200, 100, 50]));

        let resized = match_dimensions(&reference, image);
        assert_eq!(resized.dimensions(), (8, 8));
        for p in resized.pixels() {
            for (got, want) in p.0.iter().zip([200u8, 100, 50]) {
                assert!(got.abs_diff(want) <= 1, "{:?}", p);
            }
        }
    }

    #[test]
    fn test_same_size_is_untouched() {
        let reference = RgbImage::new(2, 2);
        let image = RgbImage::from_raw(2, 2, (0..12).collect()).unwrap();

        let out = match_dimensions(&reference, image.clone());
        assert_eq!(out, image);
    }

    #[test]
    fn test_alpha_dropped_and_gray_expanded() {
        let rgba = DynamicImage::ImageRgba8(RgbaImage::from_pixel(2, 2, Rgba([10, 20, 30, 0])));
        let gray = DynamicImage::ImageLuma8(GrayImage::from_pixel(2, 2, Luma([77])));

        let (a, b) = normalize_pair(rgba, gray);
        assert!(a.pixels().all(|p| *p == Rgb([10, 20, 30])));
        assert!(b.pixels().all(|p| *p == Rgb([77, 77, 77])));
    }
}
