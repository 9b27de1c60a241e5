//! `crowdcolor download` -- save the current board state as a PNG.

use std::path::{Path, PathBuf};

use crowdcolor_canvas::export::{download_file_name, export_png};
use crowdcolor_canvas::{Compositor, PixelOverlay};
use crowdcolor_core::types::BoardId;

use crate::context::AppContext;

pub async fn run(ctx: &AppContext, board_id: BoardId, out: Option<&Path>) -> anyhow::Result<()> {
    let board = ctx.api.fetch_board(board_id).await?;
    let pixels = ctx.api.fetch_pixels(board_id).await?;

    let base_bytes = ctx.api.fetch_object(&board.original_image_url).await?;
    let base = image::load_from_memory(&base_bytes)?.to_rgba8();

    let compositor = Compositor::new(base);
    let overlay = PixelOverlay::from_pixels(pixels);
    let png = export_png(&compositor, &overlay)?;

    let path = out
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(download_file_name(&board.title)));
    tokio::fs::write(&path, png).await?;

    println!("Saved {} ({} colored pixels).", path.display(), overlay.len());
    Ok(())
}
