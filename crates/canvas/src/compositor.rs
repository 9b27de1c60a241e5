//! Merge the grayscale base surface with the pixel overlay.

use image::{Rgba, RgbaImage};

use crowdcolor_core::types::PixelIndex;

use crate::overlay::PixelOverlay;

/// Gold, drawn over the selected cell in display composites.
pub const HIGHLIGHT_COLOR: Rgba<u8> = Rgba([255, 215, 0, 255]);

/// Renders board frames from an immutable base surface.
///
/// The base is the grayscale PNG as stored at creation time and never
/// changes; each frame is a fresh copy with the overlay's overrides
/// written over it. Overrides whose index falls outside the surface are
/// skipped -- they can appear when the feed delivers a row for a stale
/// board shape.
#[derive(Debug, Clone)]
pub struct Compositor {
    base: RgbaImage,
    width: u32,
    height: u32,
}

impl Compositor {
    pub fn new(base: RgbaImage) -> Self {
        let (width, height) = base.dimensions();
        Self {
            base,
            width,
            height,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// The canonical composite: base plus overlay, nothing else.
    ///
    /// This is what gets exported -- selection highlights never reach it.
    pub fn composite(&self, overlay: &PixelOverlay) -> RgbaImage {
        let mut frame = self.base.clone();
        for (&index, px) in overlay.iter() {
            self.put_index(&mut frame, index, Rgba([px.r, px.g, px.b, px.a]));
        }
        frame
    }

    /// A display composite with the selected cell painted gold.
    ///
    /// The highlight exists only in the returned frame; callers wanting
    /// the true board state use [`Compositor::composite`].
    pub fn composite_with_highlight(
        &self,
        overlay: &PixelOverlay,
        selected: Option<PixelIndex>,
    ) -> RgbaImage {
        let mut frame = self.composite(overlay);
        if let Some(index) = selected {
            self.put_index(&mut frame, index, HIGHLIGHT_COLOR);
        }
        frame
    }

    fn put_index(&self, frame: &mut RgbaImage, index: PixelIndex, color: Rgba<u8>) {
        if index >= self.width * self.height {
            return;
        }
        let x = index % self.width;
        let y = index / self.width;
        frame.put_pixel(x, y, color);
    }
}
