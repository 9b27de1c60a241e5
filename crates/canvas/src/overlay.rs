//! The client-side view of a board's colored pixels.

use std::collections::HashMap;

use crowdcolor_core::pixel::PixelOverride;
use crowdcolor_core::types::PixelIndex;

/// Sparse map from pixel index to its current override.
///
/// Populated by the initial full fetch and kept current by applying feed
/// events as they arrive. Applying an event for an index simply replaces
/// the existing entry -- last-applied-wins, matching the backend's own
/// last-writer-wins policy. No ordering is assumed across different
/// indices. Never persisted beyond the session.
#[derive(Debug, Default)]
pub struct PixelOverlay {
    entries: HashMap<PixelIndex, PixelOverride>,
}

impl PixelOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the overlay from the initial full fetch.
    pub fn from_pixels(pixels: Vec<PixelOverride>) -> Self {
        let mut overlay = Self::new();
        for px in pixels {
            overlay.apply(px);
        }
        overlay
    }

    /// Apply one override, replacing any prior entry for its index.
    pub fn apply(&mut self, pixel: PixelOverride) {
        self.entries.insert(pixel.pixel_index, pixel);
    }

    pub fn get(&self, index: PixelIndex) -> Option<&PixelOverride> {
        self.entries.get(&index)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PixelIndex, &PixelOverride)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
