//! Document text extraction port.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use thiserror::Error;

/// Errors while turning a document into text. All of them are fatal to a run.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The extension is not one of the supported formats.
    #[error("Unsupported document {path}: only PDF, DOCX and TXT are supported")]
    Unsupported { path: PathBuf },

    /// The input path does not exist.
    #[error("Document not found: {0}")]
    NotFound(PathBuf),

    /// An external extraction tool is not installed.
    #[error("{tool} not found on PATH ({hint})")]
    ToolMissing { tool: &'static str, hint: &'static str },

    /// PDF extraction failed.
    #[error("Failed to read PDF {path}: {reason}")]
    Pdf { path: PathBuf, reason: String },

    /// DOCX extraction failed.
    #[error("Failed to read DOCX {path}: {reason}")]
    Docx { path: PathBuf, reason: String },

    /// IO error while reading the document.
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ExtractError {
    /// Wrap an IO error with the document path.
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Port for extracting plain text from a source document.
#[async_trait]
pub trait DocumentReaderPort: Send + Sync {
    /// Extract the document's text, whitespace-trimmed.
    async fn extract_text(&self, path: &Path) -> Result<String, ExtractError>;
}
