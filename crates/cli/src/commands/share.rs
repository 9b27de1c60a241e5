//! `crowdcolor share` -- copy a board's page URL to the clipboard.

use crowdcolor_core::types::BoardId;

use crate::context::AppContext;

pub async fn run(ctx: &AppContext, board_id: BoardId) -> anyhow::Result<()> {
    // Resolve the board first so we never share a dead link.
    let board = ctx.api.fetch_board(board_id).await?;
    let url = ctx.board_url(board.id);

    match copy_to_clipboard(&url) {
        Ok(()) => println!("Copied to clipboard: {url}"),
        Err(e) => {
            // Headless environments have no clipboard; the URL is still
            // the point of the command.
            tracing::debug!(error = %e, "Clipboard unavailable");
            println!("{url}");
        }
    }
    Ok(())
}

fn copy_to_clipboard(text: &str) -> Result<(), arboard::Error> {
    arboard::Clipboard::new()?.set_text(text)
}
