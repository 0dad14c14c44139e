//! PDF text extraction through poppler's `pdftotext`.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use docvox_core::ExtractError;
use tokio::process::Command;
use tracing::debug;

/// Environment variable naming an explicit `pdftotext` binary.
pub const PDFTOTEXT_BIN_ENV: &str = "DOCVOX_PDFTOTEXT_BIN";

const PDFTOTEXT: &str = "pdftotext";
const INSTALL_HINT: &str = "install poppler-utils or set DOCVOX_PDFTOTEXT_BIN";

/// Locate `pdftotext`: the override variable first, then `PATH`.
pub fn find_pdftotext() -> Result<PathBuf, ExtractError> {
    if let Some(explicit) = std::env::var_os(PDFTOTEXT_BIN_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(explicit));
    }
    which::which(PDFTOTEXT).map_err(|_| ExtractError::ToolMissing {
        tool: PDFTOTEXT,
        hint: INSTALL_HINT,
    })
}

/// Extract every page's text, concatenated in page order.
pub async fn extract_pdf(binary: &Path, path: &Path) -> Result<String, ExtractError> {
    debug!(binary = %binary.display(), path = %path.display(), "Running pdftotext");

    let output = Command::new(binary)
        .arg("-enc")
        .arg("UTF-8")
        .arg(path)
        .arg("-")
        .stdin(Stdio::null())
        .kill_on_drop(true)
        .output()
        .await
        .map_err(|e| ExtractError::Pdf {
            path: path.to_path_buf(),
            reason: format!("failed to run {}: {e}", binary.display()),
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(ExtractError::Pdf {
            path: path.to_path_buf(),
            reason: format!("pdftotext exited with {}: {}", output.status, stderr.trim()),
        });
    }

    // Pages are separated by form feeds
    let text = String::from_utf8_lossy(&output.stdout).replace('\u{c}', "\n");
    Ok(text.trim().to_string())
}
