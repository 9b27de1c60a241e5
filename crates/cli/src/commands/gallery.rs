//! `crowdcolor gallery` -- list all boards.

use anyhow::Context as _;

use crate::context::AppContext;

pub async fn run(ctx: &AppContext) -> anyhow::Result<()> {
    let boards = match ctx.api.list_boards().await {
        Ok(boards) => boards,
        Err(e) => {
            tracing::debug!(error = %e, "Gallery fetch failed");
            eprintln!("Check your connection and configuration, then try again.");
            return Err(e).context("Couldn't load the gallery");
        }
    };

    if boards.is_empty() {
        println!("No boards yet. Create one with `crowdcolor create`.");
        return Ok(());
    }

    println!("{} board(s):", boards.len());
    println!();
    for board in boards {
        println!(
            "  {}  {}x{}  {:>3}% colored  {}",
            board.id,
            board.width,
            board.height,
            board.progress_percent(),
            board.title,
        );
        if let Some(description) = &board.description {
            println!("      {description}");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crowdcolor_supabase::SupabaseConfig;

    #[tokio::test]
    async fn backend_failure_surfaces_as_an_error() {
        // Nothing listens on port 1; the fetch fails fast and the
        // command must return Err rather than exit the process.
        let ctx = AppContext::new(SupabaseConfig {
            url: "http://127.0.0.1:1".into(),
            anon_key: "k".into(),
        });
        assert!(run(&ctx).await.is_err());
    }
}
