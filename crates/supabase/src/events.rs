//! Events emitted by the board feed.
//!
//! Subscribers (the interactive view, mostly) receive these instead of
//! raw Phoenix frames; everything protocol-shaped stays inside this
//! crate.

use crowdcolor_core::pixel::PixelOverride;
use crowdcolor_core::types::BoardId;

/// A feed-level event for one watched board.
#[derive(Debug, Clone)]
pub enum BoardEvent {
    /// The realtime subscription is live.
    FeedConnected { board_id: BoardId },

    /// The realtime connection dropped; a reconnect is underway.
    FeedDisconnected { board_id: BoardId },

    /// A pixel on the board was placed or re-colored.
    PixelChanged { pixel: PixelOverride },
}
