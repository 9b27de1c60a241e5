//! The `pixels` row type and the upsert payload for placements.

use serde::{Deserialize, Serialize};

use crate::color::Rgb;
use crate::types::{BoardId, PixelIndex, Timestamp};

/// A persisted color assignment for one pixel index on a board.
///
/// At most one override exists per `(board_id, pixel_index)` -- the backend
/// enforces uniqueness and resolves concurrent writes last-writer-wins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PixelOverride {
    /// Backend row id. Absent on payloads the client constructs itself.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<uuid::Uuid>,
    pub board_id: BoardId,
    pub pixel_index: PixelIndex,
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
    pub updated_at: Timestamp,
    /// Identity of the updater, when the deployment records one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_by: Option<String>,
}

impl PixelOverride {
    /// The override color as an opaque-channel triple.
    pub fn rgb(&self) -> Rgb {
        Rgb {
            r: self.r,
            g: self.g,
            b: self.b,
        }
    }

    /// Grid coordinates of this override on a board of the given width.
    pub fn coords(&self, board_width: u32) -> (u32, u32) {
        (
            self.pixel_index % board_width,
            self.pixel_index / board_width,
        )
    }
}

/// Upsert payload for placing one pixel.
///
/// The backend replaces any existing row for the same `(board, index)`;
/// there is no merge.
#[derive(Debug, Clone, Serialize)]
pub struct PlacePixel {
    pub board_id: BoardId,
    pub pixel_index: PixelIndex,
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
    pub updated_at: Timestamp,
}

impl PlacePixel {
    /// Build a fully-opaque placement from a palette color.
    pub fn new(board_id: BoardId, pixel_index: PixelIndex, color: Rgb, at: Timestamp) -> Self {
        Self {
            board_id,
            pixel_index,
            r: color.r,
            g: color.g,
            b: color.b,
            a: 255,
            updated_at: at,
        }
    }
}
