//! Platform-specific path resolution.

use std::env;
use std::path::PathBuf;

use super::error::PathError;

/// Environment variable overriding the data root.
pub const DATA_DIR_ENV: &str = "DOCVOX_DATA_DIR";

/// Root directory for docvox configuration.
///
/// Resolution order:
/// 1. `DOCVOX_DATA_DIR` environment variable
/// 2. System data directory (e.g., `~/.local/share/docvox`)
pub fn data_root() -> Result<PathBuf, PathError> {
    if let Ok(dir) = env::var(DATA_DIR_ENV) {
        if !dir.trim().is_empty() {
            return Ok(PathBuf::from(dir));
        }
    }

    dirs::data_dir()
        .map(|dir| dir.join("docvox"))
        .ok_or(PathError::NoDataDir)
}

/// Location of the optional JSON settings file.
pub fn settings_file_path() -> Result<PathBuf, PathError> {
    Ok(data_root()?.join("settings.json"))
}

/// Where converted audio goes when no output directory is configured.
///
/// Prefers the user's Downloads folder, then the home directory, then the
/// current directory.
pub fn default_output_dir() -> PathBuf {
    dirs::download_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join("Downloads")))
        .unwrap_or_else(|| PathBuf::from("."))
}
