//! PNG download of the current board state.

use crowdcolor_pipeline::{encode_png, PipelineError};

use crate::compositor::Compositor;
use crate::overlay::PixelOverlay;

/// Render the canonical composite (no highlight) as PNG bytes.
pub fn export_png(compositor: &Compositor, overlay: &PixelOverlay) -> Result<Vec<u8>, PipelineError> {
    encode_png(&compositor.composite(overlay))
}

/// File name for a downloaded board, `<title>.png`.
///
/// An empty title falls back to `crowdcolor`; path separators are
/// replaced so the name is always writable as-is.
pub fn download_file_name(title: &str) -> String {
    let trimmed = title.trim();
    let stem = if trimmed.is_empty() {
        "crowdcolor".to_string()
    } else {
        trimmed.replace(['/', '\\'], "_")
    };
    format!("{stem}.png")
}
