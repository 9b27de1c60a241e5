//! Storage encodings: lossless PNG for the board surface, lossy JPEG
//! for the gallery thumbnail.

use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, RgbaImage};

use crate::error::PipelineError;

/// Larger thumbnail dimension after scaling.
pub const THUMBNAIL_MAX_DIM: u32 = 200;

/// JPEG quality for thumbnails (0-100).
pub const THUMBNAIL_JPEG_QUALITY: u8 = 80;

/// Encode a surface as PNG bytes, exactly as rendered.
pub fn encode_png(img: &RgbaImage) -> Result<Vec<u8>, PipelineError> {
    let mut bytes = Vec::new();
    img.write_to(
        &mut std::io::Cursor::new(&mut bytes),
        image::ImageFormat::Png,
    )
    .map_err(PipelineError::Encode)?;
    Ok(bytes)
}

/// Produce the JPEG preview thumbnail for a processed board surface.
///
/// The surface is rescaled by `min(200/w, 200/h)` with dimensions
/// floored, so the larger dimension lands at 200. Board surfaces are at
/// most 64 pixels wide, so in practice this scales *up* -- that is the
/// product's historical behavior and keeps gallery tiles uniform.
pub fn thumbnail_jpeg(img: &RgbaImage) -> Result<Vec<u8>, PipelineError> {
    let ratio = (THUMBNAIL_MAX_DIM as f64 / img.width() as f64)
        .min(THUMBNAIL_MAX_DIM as f64 / img.height() as f64);
    let w = ((img.width() as f64 * ratio).floor() as u32).max(1);
    let h = ((img.height() as f64 * ratio).floor() as u32).max(1);

    let scaled = image::imageops::resize(img, w, h, image::imageops::FilterType::Triangle);

    // JPEG has no alpha channel; flatten before encoding.
    let rgb = DynamicImage::ImageRgba8(scaled).to_rgb8();

    let mut bytes = Vec::new();
    let mut cursor = std::io::Cursor::new(&mut bytes);
    let encoder = JpegEncoder::new_with_quality(&mut cursor, THUMBNAIL_JPEG_QUALITY);
    rgb.write_with_encoder(encoder).map_err(PipelineError::Encode)?;
    Ok(bytes)
}
