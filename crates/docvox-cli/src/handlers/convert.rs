//! Convert command handler.

use std::path::PathBuf;

use anyhow::Result;
use docvox_core::{RunLayout, ensure_output_dir};
use tracing::info;

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::presentation::format_summary;
use crate::utils::prompt_document_path;

/// Extract, split, synthesize and assemble one document.
///
/// When `file` is `None` the document path is asked for on the terminal.
pub async fn execute(ctx: &CliContext, file: Option<PathBuf>) -> Result<()> {
    let file = match file {
        Some(file) => file,
        None => prompt_document_path()?,
    };

    ensure_output_dir(&ctx.output_dir).map_err(CliError::from)?;
    let layout = RunLayout::for_document(&file, &ctx.output_dir).map_err(CliError::from)?;
    info!(
        input = %file.display(),
        work_dir = %layout.work_dir.display(),
        output = %layout.output.display(),
        "Starting conversion"
    );

    let text = ctx.reader.extract_text(&file).await.map_err(CliError::from)?;
    let summary = ctx
        .pipeline
        .convert(&text, &layout)
        .await
        .map_err(CliError::from)?;

    print!("{}", format_summary(&summary));
    Ok(())
}
