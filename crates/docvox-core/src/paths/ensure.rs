//! Output directory checks.
//!
//! Both checks finish by writing a marker file, so a read-only directory is
//! reported before any synthesis time is spent.

use std::fs;
use std::io;
use std::path::Path;

use super::error::PathError;

const WRITE_MARKER: &str = ".docvox_write_test";

/// Create `dir` (with parents) when missing, then confirm it is writable.
///
/// Used for the configured output directory, which may be a fresh location.
pub fn ensure_output_dir(dir: &Path) -> Result<(), PathError> {
    if !is_existing_dir(dir)? {
        fs::create_dir_all(dir).map_err(|e| PathError::CreateFailed {
            path: dir.to_path_buf(),
            reason: e.to_string(),
        })?;
    }
    verify_writable(dir)
}

/// Confirm `dir` already exists and is writable; never creates it.
///
/// Used for explicitly named destinations, where a missing directory is more
/// likely a typo than a request to create one.
pub fn require_output_dir(dir: &Path) -> Result<(), PathError> {
    if !is_existing_dir(dir)? {
        return Err(PathError::DirectoryNotFound(dir.to_path_buf()));
    }
    verify_writable(dir)
}

fn is_existing_dir(dir: &Path) -> Result<bool, PathError> {
    match fs::metadata(dir) {
        Ok(meta) if meta.is_dir() => Ok(true),
        Ok(_) => Err(PathError::NotADirectory(dir.to_path_buf())),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(PathError::NotWritable {
            path: dir.to_path_buf(),
            reason: e.to_string(),
        }),
    }
}

fn verify_writable(dir: &Path) -> Result<(), PathError> {
    let marker = dir.join(WRITE_MARKER);
    fs::write(&marker, b"docvox").map_err(|e| PathError::NotWritable {
        path: dir.to_path_buf(),
        reason: e.to_string(),
    })?;
    let _ = fs::remove_file(&marker);
    Ok(())
}
