//! Hosted-backend client: PostgREST data API, storage bucket, and the
//! realtime pixel feed.
//!
//! The backend is a stock Supabase project: two tables (`boards`,
//! `pixels`), one public storage bucket (`board-images`), and the
//! realtime service streaming `pixels` writes over a Phoenix-protocol
//! WebSocket. This crate is the only place that knows any of that;
//! everything above it deals in [`crowdcolor_core`] types and
//! [`BoardEvent`]s.

pub mod api;
pub mod client;
pub mod config;
pub mod events;
pub mod feed;
pub mod messages;
pub mod processor;
pub mod storage;

pub use api::{SupabaseApi, SupabaseApiError};
pub use config::{ConfigError, SupabaseConfig};
pub use events::BoardEvent;
pub use feed::BoardFeed;
pub use storage::{SupabaseStorage, BUCKET};
