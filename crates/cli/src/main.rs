//! `crowdcolor` -- collaborative pixel-art boards from the terminal.
//!
//! Create a board from an image, watch it change live, and place one
//! pixel every five minutes. All state lives in a hosted Supabase
//! project; this binary is a pure client.
//!
//! # Environment variables
//!
//! | Variable                | Required | Default                      | Description                        |
//! |-------------------------|----------|------------------------------|------------------------------------|
//! | `SUPABASE_URL`          | yes      | --                           | Supabase project URL               |
//! | `SUPABASE_ANON_KEY`     | yes      | --                           | Project anon (public) API key      |
//! | `CROWDCOLOR_APP_URL`    | no       | `https://crowdcolor.app`     | Base URL used for share links      |
//! | `CROWDCOLOR_STATE_FILE` | no       | `~/.crowdcolor/cooldowns.json` | Cooldown state file              |

mod cli;
mod commands;
mod context;
mod setup;

use clap::Parser;
use crowdcolor_supabase::SupabaseConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{Cli, Command};
use crate::context::AppContext;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "crowdcolor=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Cli::parse();

    let config = match SupabaseConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::debug!(error = %e, "Configuration missing");
            setup::print_setup_instructions();
            std::process::exit(1);
        }
    };
    let ctx = AppContext::new(config);

    let result = match args.command {
        Command::Gallery => commands::gallery::run(&ctx).await,
        Command::Create {
            file,
            title,
            description,
        } => commands::create::run(&ctx, &file, title, description).await,
        Command::Watch { board_id, out } => commands::watch::run(&ctx, board_id, out).await,
        Command::Place {
            board_id,
            x,
            y,
            color,
        } => commands::place::run(&ctx, board_id, x, y, &color).await,
        Command::Download { board_id, out } => {
            commands::download::run(&ctx, board_id, out.as_deref()).await
        }
        Command::Share { board_id } => commands::share::run(&ctx, board_id).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
