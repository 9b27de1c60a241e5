//! Decode, downsample, and grayscale an uploaded image.

use image::imageops::FilterType;
use image::RgbaImage;

use crate::error::PipelineError;
use crate::grayscale::grayscale_in_place;

/// Neither board dimension may exceed this.
pub const BOARD_MAX_DIM: u32 = 64;

/// A decoded, downsampled, grayscaled board surface.
#[derive(Debug, Clone)]
pub struct ProcessedImage {
    pub image: RgbaImage,
    pub width: u32,
    pub height: u32,
}

impl ProcessedImage {
    /// Flat row-major `[r, g, b, a]` values, one entry per pixel.
    ///
    /// Index `y * width + x` addresses pixel `(x, y)` -- the same
    /// numbering the pixel overlay uses.
    pub fn flat_pixels(&self) -> Vec<[u8; 4]> {
        self.image.pixels().map(|p| p.0).collect()
    }
}

/// Scale `(width, height)` to fit within `(max_w, max_h)`.
///
/// Both dimensions shrink by the same ratio `min(max_w/w, max_h/h)`,
/// rounded to the nearest integer pixel and clamped to at least 1.
/// Dimensions already within bounds are returned unchanged -- this
/// never upscales.
pub fn fit_within(width: u32, height: u32, max_w: u32, max_h: u32) -> (u32, u32) {
    if width <= max_w && height <= max_h {
        return (width, height);
    }
    let ratio = (max_w as f64 / width as f64).min(max_h as f64 / height as f64);
    let w = (width as f64 * ratio).round().max(1.0) as u32;
    let h = (height as f64 * ratio).round().max(1.0) as u32;
    (w, h)
}

/// Run the full ingestion pipeline over raw file bytes.
///
/// Unreadable input yields [`PipelineError::Decode`] and nothing else
/// happens -- no partial board is ever produced.
pub fn process_image(bytes: &[u8]) -> Result<ProcessedImage, PipelineError> {
    let decoded = image::load_from_memory(bytes)
        .map_err(PipelineError::Decode)?
        .to_rgba8();

    let (native_w, native_h) = decoded.dimensions();
    let (target_w, target_h) = fit_within(native_w, native_h, BOARD_MAX_DIM, BOARD_MAX_DIM);

    let mut surface = if (target_w, target_h) == (native_w, native_h) {
        decoded
    } else {
        image::imageops::resize(&decoded, target_w, target_h, FilterType::Lanczos3)
    };

    grayscale_in_place(&mut surface);

    Ok(ProcessedImage {
        width: surface.width(),
        height: surface.height(),
        image: surface,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn png_bytes(width: u32, height: u32, color: Rgba<u8>) -> Vec<u8> {
        let img = RgbaImage::from_pixel(width, height, color);
        let mut bytes = Vec::new();
        img.write_to(
            &mut std::io::Cursor::new(&mut bytes),
            image::ImageFormat::Png,
        )
        .unwrap();
        bytes
    }

    #[test]
    fn fit_within_leaves_small_dimensions_alone() {
        assert_eq!(fit_within(64, 64, 64, 64), (64, 64));
        assert_eq!(fit_within(10, 63, 64, 64), (10, 63));
        assert_eq!(fit_within(1, 1, 64, 64), (1, 1));
    }

    #[test]
    fn fit_within_scales_landscape() {
        assert_eq!(fit_within(200, 100, 64, 64), (64, 32));
        assert_eq!(fit_within(640, 480, 64, 64), (64, 48));
    }

    #[test]
    fn fit_within_scales_portrait() {
        assert_eq!(fit_within(100, 200, 64, 64), (32, 64));
    }

    #[test]
    fn fit_within_clamps_extreme_aspect_to_one() {
        // A 10x1000 strip scales to 1x64, never to zero width.
        assert_eq!(fit_within(10, 1000, 64, 64), (1, 64));
    }

    #[test]
    fn small_input_keeps_native_dimensions() {
        let bytes = png_bytes(10, 10, Rgba([120, 30, 200, 255]));
        let processed = process_image(&bytes).unwrap();
        assert_eq!((processed.width, processed.height), (10, 10));
    }

    #[test]
    fn large_input_lands_within_the_bound() {
        let bytes = png_bytes(200, 100, Rgba([255, 255, 255, 255]));
        let processed = process_image(&bytes).unwrap();
        assert_eq!((processed.width, processed.height), (64, 32));
        assert_eq!(processed.width * processed.height, 2048);
    }

    #[test]
    fn output_is_grayscale() {
        let bytes = png_bytes(80, 80, Rgba([239, 68, 68, 255]));
        let processed = process_image(&bytes).unwrap();
        for px in processed.image.pixels() {
            assert_eq!(px[0], px[1]);
            assert_eq!(px[1], px[2]);
            assert_eq!(px[3], 255);
        }
    }

    #[test]
    fn flat_pixels_are_row_major() {
        let mut img = RgbaImage::new(3, 2);
        img.put_pixel(2, 1, Rgba([9, 9, 9, 255]));
        let processed = ProcessedImage {
            width: 3,
            height: 2,
            image: img,
        };
        let flat = processed.flat_pixels();
        assert_eq!(flat.len(), 6);
        // (x=2, y=1) is index 1*3 + 2 = 5.
        assert_eq!(flat[5], [9, 9, 9, 255]);
    }

    #[test]
    fn garbage_bytes_fail_to_decode() {
        let err = process_image(b"definitely not an image").unwrap_err();
        assert!(matches!(err, PipelineError::Decode(_)));
    }
}
