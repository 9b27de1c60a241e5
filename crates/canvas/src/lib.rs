//! Board compositor and interaction logic.
//!
//! Everything between "rows fetched from the backend" and "pixels on
//! screen" lives here:
//!
//! - [`overlay`] -- the client-side map of colored pixel overrides.
//! - [`compositor`] -- merges the grayscale base surface with the
//!   overlay, with an optional selection highlight for display.
//! - [`hittest`] -- pointer-to-pixel-index mapping and zoom clamping.
//! - [`session`] -- the select -> submit -> placed lifecycle, gated by
//!   the client-local cooldown.
//! - [`export`] -- lossless PNG download of the current composite.

pub mod compositor;
pub mod export;
pub mod hittest;
pub mod overlay;
pub mod session;

pub use compositor::Compositor;
pub use hittest::{clamp_zoom, hit_test, ScreenRect, MAX_ZOOM, MIN_ZOOM};
pub use overlay::PixelOverlay;
pub use session::{PlacementSession, SelectionState};
