//! `crowdcolor place` -- one-shot pixel placement.

use anyhow::bail;
use chrono::Utc;
use crowdcolor_core::color::resolve_color;
use crowdcolor_core::cooldown::format_remaining;
use crowdcolor_core::error::CoreError;
use crowdcolor_core::types::BoardId;
use crowdcolor_canvas::PlacementSession;

use crate::context::AppContext;

pub async fn run(
    ctx: &AppContext,
    board_id: BoardId,
    x: u32,
    y: u32,
    color: &str,
) -> anyhow::Result<()> {
    let Some(rgb) = resolve_color(color) else {
        bail!("Unknown color {color:?} -- use a palette name or #RRGGBB hex");
    };

    let board = ctx.api.fetch_board(board_id).await?;
    if x >= board.width || y >= board.height {
        bail!(
            "({x}, {y}) is outside this {}x{} board",
            board.width,
            board.height
        );
    }
    let index = y * board.width + x;

    let mut session = PlacementSession::new(board, ctx.cooldown_tracker());
    session.set_color(rgb);
    session.select(index)?;

    let now = Utc::now();
    let payload = match session.begin_submit(now) {
        Ok(payload) => payload,
        Err(CoreError::CooldownActive { remaining }) => {
            bail!(
                "Cooldown active on this board -- next placement in {}",
                format_remaining(remaining)
            );
        }
        Err(e) => return Err(e.into()),
    };

    match ctx.api.upsert_pixel(&payload).await {
        Ok(()) => {
            session.complete_submit(Utc::now())?;
            println!("Placed {} at ({x}, {y}).", rgb.to_hex());
            Ok(())
        }
        Err(e) => {
            session.fail_submit();
            Err(e.into())
        }
    }
}
