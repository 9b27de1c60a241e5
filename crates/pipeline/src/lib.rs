//! Image ingestion pipeline.
//!
//! Turns a user-supplied image file into board material:
//!
//! 1. decode the raw bytes at native dimensions,
//! 2. downsample so neither dimension exceeds 64 (aspect preserved,
//!    never upscaled),
//! 3. replace every texel's RGB with its luminance (alpha untouched),
//! 4. encode the result as PNG for storage, plus a JPEG preview
//!    thumbnail.
//!
//! Every pass is deterministic and pure; a failure at any step aborts
//! the whole upload with no partial board.

mod encode;
mod error;
mod grayscale;
mod process;

pub use encode::{encode_png, thumbnail_jpeg, THUMBNAIL_JPEG_QUALITY, THUMBNAIL_MAX_DIM};
pub use error::PipelineError;
pub use grayscale::{grayscale_in_place, luminance};
pub use process::{fit_within, process_image, ProcessedImage, BOARD_MAX_DIM};
