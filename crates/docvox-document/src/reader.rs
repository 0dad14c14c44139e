//! Format dispatch for document extraction.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use docvox_core::{DocumentFormat, DocumentReaderPort, ExtractError};
use tracing::info;

use crate::docx::extract_docx;
use crate::pdf::{extract_pdf, find_pdftotext};

/// Reads PDF, DOCX and plain-text documents.
#[derive(Debug, Clone, Default)]
pub struct DefaultDocumentReader {
    pdftotext: Option<PathBuf>,
}

impl DefaultDocumentReader {
    pub const fn new() -> Self {
        Self { pdftotext: None }
    }

    /// Use a specific `pdftotext` binary instead of looking one up per call.
    #[must_use]
    pub fn with_pdftotext(mut self, binary: impl Into<PathBuf>) -> Self {
        self.pdftotext = Some(binary.into());
        self
    }
}

#[async_trait]
impl DocumentReaderPort for DefaultDocumentReader {
    async fn extract_text(&self, path: &Path) -> Result<String, ExtractError> {
        let format = DocumentFormat::from_path(path).ok_or_else(|| ExtractError::Unsupported {
            path: path.to_path_buf(),
        })?;

        if !tokio::fs::try_exists(path)
            .await
            .map_err(|e| ExtractError::io(path, e))?
        {
            return Err(ExtractError::NotFound(path.to_path_buf()));
        }

        let text = match format {
            DocumentFormat::Pdf => {
                let binary = match &self.pdftotext {
                    Some(binary) => binary.clone(),
                    None => find_pdftotext()?,
                };
                extract_pdf(&binary, path).await?
            }
            DocumentFormat::Docx => {
                let owned = path.to_path_buf();
                tokio::task::spawn_blocking(move || extract_docx(&owned))
                    .await
                    .map_err(|e| ExtractError::Docx {
                        path: path.to_path_buf(),
                        reason: format!("extraction task failed: {e}"),
                    })??
            }
            DocumentFormat::Text => tokio::fs::read_to_string(path)
                .await
                .map_err(|e| ExtractError::io(path, e))?
                .trim()
                .to_string(),
        };

        info!(
            path = %path.display(),
            %format,
            words = text.split_whitespace().count(),
            "Extracted document text"
        );
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn reads_plain_text_trimmed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.TXT");
        std::fs::write(&path, "\n  xin chào  \n").unwrap();

        let text = DefaultDocumentReader::new().extract_text(&path).await.unwrap();
        assert_eq!(text, "xin chào");
    }

    #[tokio::test]
    async fn unsupported_extension_is_rejected_before_io() {
        let err = DefaultDocumentReader::new()
            .extract_text(Path::new("/nowhere/slides.pptx"))
            .await
            .unwrap_err();
        assert!(matches!(err, ExtractError::Unsupported { .. }));
    }

    #[tokio::test]
    async fn missing_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let err = DefaultDocumentReader::new()
            .extract_text(&dir.path().join("gone.docx"))
            .await
            .unwrap_err();
        assert!(matches!(err, ExtractError::NotFound(_)));
    }
}
