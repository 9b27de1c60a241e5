//! The luminosity grayscale pass.

use image::RgbaImage;

/// Perceptual luminance of one texel: `round(0.299 R + 0.587 G + 0.114 B)`.
pub fn luminance(r: u8, g: u8, b: u8) -> u8 {
    (0.299 * r as f64 + 0.587 * g as f64 + 0.114 * b as f64).round() as u8
}

/// Replace R, G, B of every texel with its luminance, in place.
///
/// Alpha is left untouched. The pass is pure and idempotent: a texel
/// whose channels are already equal maps to itself.
pub fn grayscale_in_place(img: &mut RgbaImage) {
    for px in img.pixels_mut() {
        let gray = luminance(px[0], px[1], px[2]);
        px[0] = gray;
        px[1] = gray;
        px[2] = gray;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn luminance_of_primaries() {
        assert_eq!(luminance(255, 0, 0), 76);
        assert_eq!(luminance(0, 255, 0), 150);
        assert_eq!(luminance(0, 0, 255), 29);
        assert_eq!(luminance(255, 255, 255), 255);
        assert_eq!(luminance(0, 0, 0), 0);
    }

    #[test]
    fn luminance_of_palette_red() {
        // #EF4444: 0.299*239 + 0.587*68 + 0.114*68 = 119.129
        assert_eq!(luminance(239, 68, 68), 119);
    }

    #[test]
    fn pass_preserves_alpha() {
        let mut img = RgbaImage::from_pixel(3, 3, Rgba([200, 10, 30, 128]));
        grayscale_in_place(&mut img);
        for px in img.pixels() {
            assert_eq!(px[0], px[1]);
            assert_eq!(px[1], px[2]);
            assert_eq!(px[3], 128);
        }
    }

    #[test]
    fn pass_is_idempotent() {
        let mut img = RgbaImage::new(4, 4);
        for (i, px) in img.pixels_mut().enumerate() {
            *px = Rgba([(i * 17) as u8, (i * 5) as u8, (255 - i * 9) as u8, 255]);
        }
        let mut once = img.clone();
        grayscale_in_place(&mut once);
        let mut twice = once.clone();
        grayscale_in_place(&mut twice);
        assert_eq!(once, twice);
    }
}
