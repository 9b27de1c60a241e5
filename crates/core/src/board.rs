//! The `boards` row type as the backend serves it, plus the insert payload.

use serde::{Deserialize, Serialize};

use crate::types::{BoardId, Timestamp};

/// One collaborative canvas: a fixed pixel grid derived from an uploaded
/// image.
///
/// Owned by the backend store; the client only holds transient copies.
/// `colored_pixels` is maintained server-side and is never recomputed here
/// except for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Board {
    pub id: BoardId,
    pub title: String,
    pub description: Option<String>,
    /// Public URL of the processed grayscale base image (PNG).
    pub original_image_url: String,
    /// Public URL of the JPEG preview thumbnail, if one was stored.
    pub thumbnail_url: Option<String>,
    pub width: u32,
    pub height: u32,
    /// Always `width * height`; duplicated server-side for cheap listing.
    pub total_pixels: u32,
    /// Count of pixels that have been colored at least once.
    pub colored_pixels: u32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Board {
    /// Check the grid invariants: `total_pixels == width * height` and
    /// `colored_pixels <= total_pixels`.
    pub fn invariants_hold(&self) -> bool {
        self.total_pixels == self.width * self.height
            && self.colored_pixels <= self.total_pixels
    }

    /// Completion percentage for display, rounded to the nearest integer.
    pub fn progress_percent(&self) -> u32 {
        if self.total_pixels == 0 {
            return 0;
        }
        ((self.colored_pixels as f64 / self.total_pixels as f64) * 100.0).round() as u32
    }
}

/// Insert payload for a new board row.
///
/// The id is generated client-side (UUID v4) so the storage object can be
/// named before the row exists.
#[derive(Debug, Clone, Serialize)]
pub struct CreateBoard {
    pub id: BoardId,
    pub title: String,
    pub description: Option<String>,
    pub original_image_url: String,
    pub thumbnail_url: Option<String>,
    pub width: u32,
    pub height: u32,
    pub total_pixels: u32,
    pub colored_pixels: u32,
}

impl CreateBoard {
    /// Build an insert payload for a freshly processed image.
    ///
    /// `total_pixels` is derived from the dimensions; `colored_pixels`
    /// starts at zero.
    pub fn new(
        id: BoardId,
        title: String,
        description: Option<String>,
        original_image_url: String,
        thumbnail_url: Option<String>,
        width: u32,
        height: u32,
    ) -> Self {
        Self {
            id,
            title,
            description,
            original_image_url,
            thumbnail_url,
            width,
            height,
            total_pixels: width * height,
            colored_pixels: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn board(width: u32, height: u32, colored: u32) -> Board {
        Board {
            id: uuid::Uuid::new_v4(),
            title: "Test".into(),
            description: None,
            original_image_url: "https://example.com/base.png".into(),
            thumbnail_url: None,
            width,
            height,
            total_pixels: width * height,
            colored_pixels: colored,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn invariants_hold_for_consistent_board() {
        assert!(board(64, 32, 100).invariants_hold());
    }

    #[test]
    fn invariants_reject_mismatched_totals() {
        let mut b = board(64, 32, 0);
        b.total_pixels = 2047;
        assert!(!b.invariants_hold());
    }

    #[test]
    fn invariants_reject_overcount() {
        assert!(!board(8, 8, 65).invariants_hold());
    }

    #[test]
    fn progress_percent_rounds() {
        assert_eq!(board(64, 32, 0).progress_percent(), 0);
        assert_eq!(board(64, 32, 2048).progress_percent(), 100);
        assert_eq!(board(10, 10, 25).progress_percent(), 25);
        // 1/3 of 2048 rounds to 33%
        assert_eq!(board(64, 32, 683).progress_percent(), 33);
    }

    #[test]
    fn progress_percent_of_empty_grid_is_zero() {
        assert_eq!(board(0, 0, 0).progress_percent(), 0);
    }

    #[test]
    fn create_board_derives_totals() {
        let payload = CreateBoard::new(
            uuid::Uuid::new_v4(),
            "Test".into(),
            None,
            "https://example.com/base.png".into(),
            None,
            64,
            32,
        );
        assert_eq!(payload.total_pixels, 2048);
        assert_eq!(payload.colored_pixels, 0);
    }

    #[test]
    fn board_deserializes_from_backend_row() {
        let json = r#"{
            "id": "f47ac10b-58cc-4372-a567-0e02b2c3d479",
            "title": "Sunset",
            "description": null,
            "original_image_url": "https://x.supabase.co/storage/v1/object/public/board-images/f47ac10b-58cc-4372-a567-0e02b2c3d479.png",
            "thumbnail_url": null,
            "width": 64,
            "height": 32,
            "total_pixels": 2048,
            "colored_pixels": 17,
            "created_at": "2024-05-01T12:00:00Z",
            "updated_at": "2024-05-02T08:30:00Z"
        }"#;
        let b: Board = serde_json::from_str(json).unwrap();
        assert_eq!(b.title, "Sunset");
        assert_eq!(b.width, 64);
        assert!(b.invariants_hold());
    }
}
