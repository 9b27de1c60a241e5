//! CrowdColor domain types and client-local state.
//!
//! This crate holds everything that is shared across the workspace and
//! owned by the client rather than the hosted backend:
//!
//! - [`board`] / [`pixel`] -- the `boards` and `pixels` row types as the
//!   backend serves them, plus the client->backend write payloads.
//! - [`color`] -- the product color palette and hex/RGB conversion.
//! - [`cooldown`] -- the advisory per-board placement cooldown and the
//!   key-value store it persists in.
//! - [`validation`] -- upload form validation rules.
//! - [`error`] -- the shared [`CoreError`](error::CoreError) type.

pub mod board;
pub mod color;
pub mod cooldown;
pub mod error;
pub mod pixel;
pub mod types;
pub mod validation;

pub use board::{Board, CreateBoard};
pub use color::Rgb;
pub use cooldown::{CooldownTracker, KeyValueStore};
pub use error::CoreError;
pub use pixel::{PixelOverride, PlacePixel};
