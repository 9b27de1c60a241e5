//! The select -> submit -> placed lifecycle for one open board.

use crowdcolor_core::board::Board;
use crowdcolor_core::color::{Rgb, PALETTE};
use crowdcolor_core::cooldown::{CooldownTracker, KeyValueStore};
use crowdcolor_core::error::CoreError;
use crowdcolor_core::pixel::PlacePixel;
use crowdcolor_core::types::{PixelIndex, Timestamp};

/// Where the user is in the placement flow.
///
/// Selection is free and never gated; only the transition out of
/// `Selected` consults the cooldown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionState {
    Unselected,
    Selected(PixelIndex),
    /// Submit in flight; further input is ignored until it resolves.
    Pending(PixelIndex),
}

/// Per-board interaction state: current selection, chosen color, and the
/// cooldown gate.
///
/// The session hands out [`PlacePixel`] payloads but never talks to the
/// backend itself; the caller performs the upsert and reports back via
/// [`PlacementSession::complete_submit`] or
/// [`PlacementSession::fail_submit`].
#[derive(Debug)]
pub struct PlacementSession<S: KeyValueStore> {
    board: Board,
    cooldown: CooldownTracker<S>,
    state: SelectionState,
    color: Rgb,
}

impl<S: KeyValueStore> PlacementSession<S> {
    pub fn new(board: Board, cooldown: CooldownTracker<S>) -> Self {
        Self {
            board,
            cooldown,
            state: SelectionState::Unselected,
            // First palette entry, same default every client starts with.
            color: Rgb::from_hex(PALETTE[0].hex),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn state(&self) -> SelectionState {
        self.state
    }

    pub fn selected(&self) -> Option<PixelIndex> {
        match self.state {
            SelectionState::Unselected => None,
            SelectionState::Selected(i) | SelectionState::Pending(i) => Some(i),
        }
    }

    pub fn color(&self) -> Rgb {
        self.color
    }

    /// Change the active color; applies to the next submit, not to
    /// anything already placed.
    pub fn set_color(&mut self, color: Rgb) {
        self.color = color;
    }

    /// Select a pixel by index. Ignored while a submit is pending;
    /// out-of-range indices are rejected.
    pub fn select(&mut self, index: PixelIndex) -> Result<(), CoreError> {
        if matches!(self.state, SelectionState::Pending(_)) {
            return Ok(());
        }
        if index >= self.board.total_pixels {
            return Err(CoreError::Validation(format!(
                "Pixel index {index} is out of range for this board"
            )));
        }
        self.state = SelectionState::Selected(index);
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        if !matches!(self.state, SelectionState::Pending(_)) {
            self.state = SelectionState::Unselected;
        }
    }

    /// Time left on this board's cooldown at `now`.
    pub fn cooldown_remaining(&self, now: Timestamp) -> Result<std::time::Duration, CoreError> {
        self.cooldown.remaining(&self.board.id, now)
    }

    /// Start a submit: checks the cooldown, moves to `Pending`, and
    /// returns the upsert payload for the caller to send.
    ///
    /// On any error the selection is retained so the user can retry.
    pub fn begin_submit(&mut self, now: Timestamp) -> Result<PlacePixel, CoreError> {
        let SelectionState::Selected(index) = self.state else {
            return Err(CoreError::Validation(
                "No pixel selected".to_string(),
            ));
        };
        self.cooldown.check(&self.board.id, now)?;
        self.state = SelectionState::Pending(index);
        Ok(PlacePixel::new(self.board.id, index, self.color, now))
    }

    /// The upsert succeeded: record the cooldown and clear the selection.
    pub fn complete_submit(&mut self, now: Timestamp) -> Result<(), CoreError> {
        if let SelectionState::Pending(_) = self.state {
            self.cooldown.record_placement(self.board.id, now)?;
            self.state = SelectionState::Unselected;
        }
        Ok(())
    }

    /// The upsert failed: no cooldown is recorded and the selection is
    /// restored for a retry.
    pub fn fail_submit(&mut self) {
        if let SelectionState::Pending(index) = self.state {
            self.state = SelectionState::Selected(index);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use chrono::{TimeDelta, Utc};
    use crowdcolor_core::board::CreateBoard;
    use crowdcolor_core::cooldown::MemoryStore;

    fn board() -> Board {
        let create = CreateBoard::new(
            uuid::Uuid::new_v4(),
            "Sunset".to_string(),
            None,
            "https://example.test/orig.png".to_string(),
            None,
            8,
            4,
        );
        Board {
            id: create.id,
            title: create.title,
            description: create.description,
            original_image_url: create.original_image_url,
            thumbnail_url: create.thumbnail_url,
            width: create.width,
            height: create.height,
            total_pixels: create.total_pixels,
            colored_pixels: create.colored_pixels,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn session() -> PlacementSession<MemoryStore> {
        PlacementSession::new(board(), CooldownTracker::new(MemoryStore::default()))
    }

    #[test]
    fn full_lifecycle_places_and_resets() {
        let mut s = session();
        let now = Utc::now();

        s.select(10).unwrap();
        s.set_color(Rgb { r: 59, g: 130, b: 246 });

        let payload = s.begin_submit(now).unwrap();
        assert_eq!(payload.pixel_index, 10);
        assert_eq!((payload.r, payload.g, payload.b, payload.a), (59, 130, 246, 255));
        assert_eq!(s.state(), SelectionState::Pending(10));

        s.complete_submit(now).unwrap();
        assert_eq!(s.state(), SelectionState::Unselected);
        assert!(!s.cooldown_remaining(now).unwrap().is_zero());
    }

    #[test]
    fn default_color_is_the_first_palette_entry() {
        let s = session();
        assert_eq!(s.color(), Rgb { r: 239, g: 68, b: 68 });
    }

    #[test]
    fn submit_without_selection_is_rejected() {
        let mut s = session();
        assert_matches!(s.begin_submit(Utc::now()), Err(CoreError::Validation(_)));
    }

    #[test]
    fn out_of_range_selection_is_rejected() {
        let mut s = session();
        assert_matches!(s.select(8 * 4), Err(CoreError::Validation(_)));
        assert_eq!(s.state(), SelectionState::Unselected);
    }

    #[test]
    fn second_submit_within_the_window_is_blocked() {
        let mut s = session();
        let now = Utc::now();

        s.select(0).unwrap();
        s.begin_submit(now).unwrap();
        s.complete_submit(now).unwrap();

        s.select(1).unwrap();
        let soon = now + TimeDelta::seconds(30);
        let err = s.begin_submit(soon).unwrap_err();
        assert_matches!(err, CoreError::CooldownActive { .. });
        // Selection survives the rejection.
        assert_eq!(s.state(), SelectionState::Selected(1));

        let later = now + TimeDelta::seconds(5 * 60);
        assert!(s.begin_submit(later).is_ok());
    }

    #[test]
    fn failed_submit_keeps_selection_and_cooldown_clear() {
        let mut s = session();
        let now = Utc::now();

        s.select(5).unwrap();
        s.begin_submit(now).unwrap();
        s.fail_submit();

        assert_eq!(s.state(), SelectionState::Selected(5));
        // No cooldown was recorded; an immediate retry is allowed.
        assert!(s.begin_submit(now).is_ok());
    }

    #[test]
    fn input_is_ignored_while_pending() {
        let mut s = session();
        s.select(3).unwrap();
        s.begin_submit(Utc::now()).unwrap();

        s.select(4).unwrap();
        s.clear_selection();
        assert_eq!(s.state(), SelectionState::Pending(3));
    }
}
