//! Pointer-to-pixel mapping and zoom limits.

use crowdcolor_core::types::PixelIndex;

pub const MIN_ZOOM: f64 = 1.0;
pub const MAX_ZOOM: f64 = 25.0;

/// The board's on-screen bounding box, in the same coordinate space as
/// pointer positions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// Map a pointer position to a pixel index, or `None` when it falls
/// outside the rect.
///
/// The pointer offset is scaled by `board / rect` per axis and floored,
/// so every screen point inside a cell's footprint maps to that cell at
/// any zoom level. The far edges are treated as inside: a pointer at the
/// exact bottom-right corner lands on the last pixel.
pub fn hit_test(
    board_width: u32,
    board_height: u32,
    rect: ScreenRect,
    pointer_x: f64,
    pointer_y: f64,
) -> Option<PixelIndex> {
    if board_width == 0 || board_height == 0 || rect.width <= 0.0 || rect.height <= 0.0 {
        return None;
    }
    let off_x = pointer_x - rect.left;
    let off_y = pointer_y - rect.top;
    if off_x < 0.0 || off_y < 0.0 || off_x > rect.width || off_y > rect.height {
        return None;
    }
    let x = ((off_x * board_width as f64 / rect.width).floor() as u32).min(board_width - 1);
    let y = ((off_y * board_height as f64 / rect.height).floor() as u32).min(board_height - 1);
    Some(y * board_width + x)
}

/// Clamp a requested zoom factor to the supported range.
pub fn clamp_zoom(zoom: f64) -> f64 {
    zoom.clamp(MIN_ZOOM, MAX_ZOOM)
}

#[cfg(test)]
mod tests {
    use super::*;

    const RECT: ScreenRect = ScreenRect {
        left: 100.0,
        top: 50.0,
        width: 640.0,
        height: 320.0,
    };

    #[test]
    fn top_left_corner_is_index_zero() {
        assert_eq!(hit_test(64, 32, RECT, 100.0, 50.0), Some(0));
    }

    #[test]
    fn bottom_right_corner_is_the_last_index() {
        assert_eq!(hit_test(64, 32, RECT, 740.0, 370.0), Some(64 * 32 - 1));
    }

    #[test]
    fn interior_point_floors_to_its_cell() {
        // 10px per cell on both axes; a point 4.9 cells in hits cell 4.
        assert_eq!(hit_test(64, 32, RECT, 149.0, 50.0), Some(4));
        // Just across the cell boundary hits cell 5.
        assert_eq!(hit_test(64, 32, RECT, 150.0, 50.0), Some(5));
    }

    #[test]
    fn points_outside_the_rect_miss() {
        assert_eq!(hit_test(64, 32, RECT, 99.9, 50.0), None);
        assert_eq!(hit_test(64, 32, RECT, 100.0, 49.9), None);
        assert_eq!(hit_test(64, 32, RECT, 740.1, 370.0), None);
        assert_eq!(hit_test(64, 32, RECT, 740.0, 370.1), None);
    }

    #[test]
    fn mapping_is_zoom_invariant() {
        // The same board shown at 4x the screen size maps identically
        // for proportional pointer positions.
        let zoomed = ScreenRect {
            left: 0.0,
            top: 0.0,
            width: 2560.0,
            height: 1280.0,
        };
        assert_eq!(hit_test(64, 32, zoomed, 601.0, 39.0), Some(15));
        let small = ScreenRect {
            left: 0.0,
            top: 0.0,
            width: 640.0,
            height: 320.0,
        };
        assert_eq!(hit_test(64, 32, small, 150.25, 9.75), Some(15));
    }

    #[test]
    fn degenerate_geometry_misses() {
        let flat = ScreenRect {
            left: 0.0,
            top: 0.0,
            width: 0.0,
            height: 320.0,
        };
        assert_eq!(hit_test(64, 32, flat, 0.0, 0.0), None);
        assert_eq!(hit_test(0, 32, RECT, 100.0, 50.0), None);
    }

    #[test]
    fn zoom_clamps_to_the_supported_range() {
        assert_eq!(clamp_zoom(0.2), 1.0);
        assert_eq!(clamp_zoom(7.5), 7.5);
        assert_eq!(clamp_zoom(400.0), 25.0);
    }
}
