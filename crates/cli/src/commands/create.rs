//! `crowdcolor create` -- turn an image file into a new board.

use std::path::Path;

use crowdcolor_core::board::CreateBoard;
use crowdcolor_core::validation::{check_upload_size, UploadForm};
use crowdcolor_pipeline::{encode_png, process_image, thumbnail_jpeg};
use crowdcolor_supabase::SupabaseStorage;

use crate::context::AppContext;

pub async fn run(
    ctx: &AppContext,
    file: &Path,
    title: String,
    description: Option<String>,
) -> anyhow::Result<()> {
    let form = UploadForm::new(&title, description.as_deref());
    form.check()?;

    let metadata = tokio::fs::metadata(file).await?;
    check_upload_size(metadata.len())?;
    let bytes = tokio::fs::read(file).await?;

    let processed = process_image(&bytes)?;
    tracing::info!(
        width = processed.width,
        height = processed.height,
        "Image processed",
    );

    let png = encode_png(&processed.image)?;
    let thumb = thumbnail_jpeg(&processed.image)?;

    let board_id = uuid::Uuid::new_v4();
    let image_url = ctx
        .storage
        .upload(
            &SupabaseStorage::base_object_name(board_id),
            png,
            "image/png",
        )
        .await?;
    let thumbnail_url = ctx
        .storage
        .upload(
            &SupabaseStorage::thumbnail_object_name(board_id),
            thumb,
            "image/jpeg",
        )
        .await?;

    let payload = CreateBoard::new(
        board_id,
        form.title,
        form.description,
        image_url,
        Some(thumbnail_url),
        processed.width,
        processed.height,
    );
    let board = ctx.api.insert_board(&payload).await?;

    println!("Created board \"{}\" ({}x{}).", board.title, board.width, board.height);
    println!("  id:  {}", board.id);
    println!("  url: {}", ctx.board_url(board.id));
    Ok(())
}
