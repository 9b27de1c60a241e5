//! `crowdcolor watch` -- follow a board live and place pixels.
//!
//! Drives one interactive session over `tokio::select!`: feed events
//! re-render the board PNG, a 1-second ticker refreshes the cooldown
//! countdown, and stdin lines are parsed as commands. Teardown shuts
//! the feed down cleanly.

use std::io::Write as _;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context as _;
use chrono::Utc;
use crowdcolor_canvas::export::{download_file_name, export_png};
use crowdcolor_canvas::{clamp_zoom, hit_test, Compositor, PixelOverlay, PlacementSession, ScreenRect};
use crowdcolor_core::color::{resolve_color, PALETTE};
use crowdcolor_core::cooldown::format_remaining;
use crowdcolor_core::error::CoreError;
use crowdcolor_core::types::BoardId;
use crowdcolor_supabase::{BoardEvent, BoardFeed};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast;

use crate::context::AppContext;

/// Default display scale: screen pixels per board pixel.
const DEFAULT_ZOOM: f64 = 10.0;

pub async fn run(ctx: &AppContext, board_id: BoardId, out: Option<PathBuf>) -> anyhow::Result<()> {
    let board = ctx.api.fetch_board(board_id).await?;
    let pixels = ctx.api.fetch_pixels(board_id).await?;
    let base_bytes = ctx.api.fetch_object(&board.original_image_url).await?;
    let base = image::load_from_memory(&base_bytes)
        .context("Board base image is unreadable")?
        .to_rgba8();

    let out_path = out.unwrap_or_else(|| PathBuf::from(download_file_name(&board.title)));
    let compositor = Compositor::new(base);
    let mut overlay = PixelOverlay::from_pixels(pixels);
    let mut session = PlacementSession::new(board.clone(), ctx.cooldown_tracker());
    let mut zoom = DEFAULT_ZOOM;

    render(&compositor, &overlay, &session, &out_path)?;
    println!(
        "Watching \"{}\" ({}x{}, {}% colored). Rendering to {}.",
        board.title,
        board.width,
        board.height,
        board.progress_percent(),
        out_path.display(),
    );
    print_help();

    let feed = BoardFeed::start(&ctx.config, board_id);
    let mut events = feed.subscribe();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut ticker = tokio::time::interval(Duration::from_secs(1));

    loop {
        tokio::select! {
            event = events.recv() => {
                match event {
                    Ok(BoardEvent::PixelChanged { pixel }) => {
                        overlay.apply(pixel);
                        render(&compositor, &overlay, &session, &out_path)?;
                    }
                    Ok(BoardEvent::FeedConnected { .. }) => {
                        println!("Live feed connected.");
                    }
                    Ok(BoardEvent::FeedDisconnected { .. }) => {
                        println!("Live feed lost -- reconnecting...");
                    }
                    Err(broadcast::error::RecvError::Lagged(missed)) => {
                        tracing::warn!(missed, "Feed events dropped; re-rendering");
                        render(&compositor, &overlay, &session, &out_path)?;
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
            _ = ticker.tick() => {
                print_countdown(&session)?;
            }
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match handle_command(ctx, &line, &compositor, &mut overlay, &mut session, &mut zoom, &out_path).await? {
                    Flow::Continue => {}
                    Flow::Quit => break,
                }
            }
        }
    }

    feed.shutdown().await;
    Ok(())
}

enum Flow {
    Continue,
    Quit,
}

async fn handle_command(
    ctx: &AppContext,
    line: &str,
    compositor: &Compositor,
    overlay: &mut PixelOverlay,
    session: &mut PlacementSession<crowdcolor_core::cooldown::JsonFileStore>,
    zoom: &mut f64,
    out_path: &Path,
) -> anyhow::Result<Flow> {
    let mut parts = line.split_whitespace();
    match parts.next() {
        None => {}
        Some("quit") | Some("q") => return Ok(Flow::Quit),
        Some("help") => print_help(),
        Some("click") => {
            let (Some(x), Some(y)) = (parse_f64(parts.next()), parse_f64(parts.next())) else {
                println!("Usage: click <x> <y>  (screen coordinates at the current zoom)");
                return Ok(Flow::Continue);
            };
            let board = session.board();
            let (board_width, board_height) = (board.width, board.height);
            let rect = ScreenRect {
                left: 0.0,
                top: 0.0,
                width: board_width as f64 * *zoom,
                height: board_height as f64 * *zoom,
            };
            match hit_test(board_width, board_height, rect, x, y) {
                Some(index) => {
                    session.select(index)?;
                    let (px, py) = (index % board_width, index / board_width);
                    println!("Selected pixel ({px}, {py}).");
                    render(compositor, overlay, session, out_path)?;
                }
                None => println!("That point is outside the board."),
            }
        }
        Some("color") => {
            let Some(arg) = parts.next() else {
                print_palette();
                return Ok(Flow::Continue);
            };
            match resolve_color(arg) {
                Some(rgb) => {
                    session.set_color(rgb);
                    println!("Color set to {}.", rgb.to_hex());
                }
                None => println!("Unknown color {arg:?}. Type `color` to list the palette."),
            }
        }
        Some("zoom") => {
            let Some(z) = parse_f64(parts.next()) else {
                println!("Usage: zoom <1-25>");
                return Ok(Flow::Continue);
            };
            *zoom = clamp_zoom(z);
            println!("Zoom set to {zoom}x.");
        }
        Some("place") => {
            place(ctx, overlay, session).await?;
            render(compositor, overlay, session, out_path)?;
        }
        Some("download") => {
            let path = parts
                .next()
                .map(PathBuf::from)
                .unwrap_or_else(|| out_path.to_path_buf());
            let png = export_png(compositor, overlay)?;
            tokio::fs::write(&path, png).await?;
            println!("Saved {}.", path.display());
        }
        Some("share") => {
            println!("{}", ctx.board_url(session.board().id));
        }
        Some(other) => {
            println!("Unknown command {other:?}. Type `help` for the list.");
        }
    }
    Ok(Flow::Continue)
}

/// Submit the current selection, keeping the session state machine and
/// the local overlay in step with the outcome.
async fn place(
    ctx: &AppContext,
    overlay: &mut PixelOverlay,
    session: &mut PlacementSession<crowdcolor_core::cooldown::JsonFileStore>,
) -> anyhow::Result<()> {
    let now = Utc::now();
    let payload = match session.begin_submit(now) {
        Ok(payload) => payload,
        Err(CoreError::CooldownActive { remaining }) => {
            println!("Cooldown active -- ready in {}.", format_remaining(remaining));
            return Ok(());
        }
        Err(CoreError::Validation(msg)) => {
            println!("{msg}. Use `click` to select a pixel first.");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    match ctx.api.upsert_pixel(&payload).await {
        Ok(()) => {
            session.complete_submit(Utc::now())?;
            // Apply locally right away; the feed echo will simply
            // overwrite with the same value.
            overlay.apply(crowdcolor_core::pixel::PixelOverride {
                id: None,
                board_id: payload.board_id,
                pixel_index: payload.pixel_index,
                r: payload.r,
                g: payload.g,
                b: payload.b,
                a: payload.a,
                updated_at: payload.updated_at,
                updated_by: None,
            });
            println!("Pixel placed.");
        }
        Err(e) => {
            session.fail_submit();
            println!("Placement failed: {e}. Your selection is kept -- try again.");
        }
    }
    Ok(())
}

fn render(
    compositor: &Compositor,
    overlay: &PixelOverlay,
    session: &PlacementSession<crowdcolor_core::cooldown::JsonFileStore>,
    out_path: &Path,
) -> anyhow::Result<()> {
    let frame = compositor.composite_with_highlight(overlay, session.selected());
    let mut bytes = Vec::new();
    frame.write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)?;
    std::fs::write(out_path, bytes)?;
    Ok(())
}

/// Refresh the countdown line in place while the cooldown is running.
fn print_countdown(
    session: &PlacementSession<crowdcolor_core::cooldown::JsonFileStore>,
) -> anyhow::Result<()> {
    let remaining = session.cooldown_remaining(Utc::now())?;
    if !remaining.is_zero() {
        print!("\rNext placement in {}   ", format_remaining(remaining));
        std::io::stdout().flush()?;
    }
    Ok(())
}

fn print_help() {
    println!(
        "\
Commands:
  click <x> <y>      select the pixel under screen point (x, y)
  color [name|#hex]  set the placement color (no argument lists the palette)
  zoom <1-25>        set the display scale used by `click`
  place              place the selected pixel (5-minute cooldown per board)
  download [path]    save the board as a PNG (without the selection marker)
  share              print this board's page URL
  help               show this list
  quit               leave"
    );
}

fn print_palette() {
    println!("Palette:");
    for color in PALETTE {
        println!("  {:<8} {}", color.name, color.hex);
    }
}

fn parse_f64(arg: Option<&str>) -> Option<f64> {
    arg.and_then(|a| a.parse().ok())
}
