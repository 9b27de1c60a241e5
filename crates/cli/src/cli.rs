//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use crowdcolor_core::types::BoardId;

#[derive(Debug, Parser)]
#[command(
    name = "crowdcolor",
    version,
    about = "Collaborative pixel-art boards from your terminal"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List all boards, newest first.
    Gallery,

    /// Create a new board from an image file.
    Create {
        /// Path to the source image (PNG, JPEG, or WebP).
        file: PathBuf,
        /// Board title (1-100 characters).
        #[arg(long)]
        title: String,
        /// Optional description (up to 500 characters).
        #[arg(long)]
        description: Option<String>,
    },

    /// Open a board and follow it live, placing pixels interactively.
    Watch {
        board_id: BoardId,
        /// Where to write the rendered board PNG (default: `<title>.png`).
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Place a single pixel and exit.
    Place {
        board_id: BoardId,
        /// Column, 0-based from the left.
        x: u32,
        /// Row, 0-based from the top.
        y: u32,
        /// Palette color name or `#RRGGBB` hex.
        #[arg(long)]
        color: String,
    },

    /// Save the current board state as a PNG.
    Download {
        board_id: BoardId,
        /// Output path (default: `<title>.png`).
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Copy a board's page URL to the clipboard.
    Share { board_id: BoardId },
}
