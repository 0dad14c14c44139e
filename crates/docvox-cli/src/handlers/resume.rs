//! Resume command handler.

use std::path::{Path, PathBuf};

use anyhow::Result;
use docvox_core::{RunLayout, require_output_dir};

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::presentation::format_summary;

/// Finish a run from an existing working directory.
///
/// Only chunks whose audio is missing or too small are synthesized again.
/// The directory of the final file must already exist.
pub async fn execute(ctx: &CliContext, work_dir: &Path, output: Option<PathBuf>) -> Result<()> {
    if !work_dir.is_dir() {
        return Err(CliError::Arguments(format!(
            "{} is not a working directory",
            work_dir.display()
        ))
        .into());
    }

    let mut layout = RunLayout::from_work_dir(work_dir).map_err(CliError::from)?;
    if let Some(output) = output {
        layout = layout.with_output(output);
    }
    require_output_dir(destination_dir(&layout.output)).map_err(CliError::from)?;

    let summary = ctx.pipeline.resume(&layout).await.map_err(CliError::from)?;
    print!("{}", format_summary(&summary));
    Ok(())
}

/// Directory the final file will be written into.
fn destination_dir(output: &Path) -> &Path {
    output
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."))
}
