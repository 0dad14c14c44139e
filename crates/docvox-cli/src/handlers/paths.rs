//! Paths command handler.
//!
//! Displays all resolved paths for diagnostics and debugging.

use anyhow::Result;
use docvox_core::{Settings, data_root, settings_file_path};

use crate::bootstrap::output_dir;

/// Print resolved locations in `key = value` format.
pub fn execute(settings: &Settings) -> Result<()> {
    let data = data_root()?;
    let settings_file = settings_file_path()?;
    let present = if settings_file.is_file() { "" } else { " (not present)" };

    println!("data_root = {}", data.display());
    println!("settings_file = {}{present}", settings_file.display());
    println!("output_dir = {}", output_dir(settings).display());
    Ok(())
}
