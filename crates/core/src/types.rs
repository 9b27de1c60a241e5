/// Boards and pixel rows are keyed by backend-assigned UUIDs.
pub type BoardId = uuid::Uuid;

/// Zero-based row-major index into a board's `width * height` grid.
pub type PixelIndex = u32;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
