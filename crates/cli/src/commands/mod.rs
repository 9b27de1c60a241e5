//! One module per subcommand.

pub mod create;
pub mod download;
pub mod gallery;
pub mod place;
pub mod share;
pub mod watch;
