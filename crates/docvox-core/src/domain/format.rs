//! Supported source document formats.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Source document format, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    Pdf,
    Docx,
    Text,
}

impl DocumentFormat {
    /// Detect the format from the path's extension (case-insensitive).
    ///
    /// Returns `None` for anything that is not `.pdf`, `.docx` or `.txt`.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "pdf" => Some(Self::Pdf),
            "docx" => Some(Self::Docx),
            "txt" => Some(Self::Text),
            _ => None,
        }
    }

    /// Extensions accepted by the document reader.
    pub const fn supported_extensions() -> &'static [&'static str] {
        &["pdf", "docx", "txt"]
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pdf => write!(f, "PDF"),
            Self::Docx => write!(f, "DOCX"),
            Self::Text => write!(f, "plain text"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_by_extension_case_insensitively() {
        assert_eq!(
            DocumentFormat::from_path(Path::new("book.PDF")),
            Some(DocumentFormat::Pdf)
        );
        assert_eq!(
            DocumentFormat::from_path(Path::new("/tmp/notes.docx")),
            Some(DocumentFormat::Docx)
        );
        assert_eq!(
            DocumentFormat::from_path(Path::new("a.txt")),
            Some(DocumentFormat::Text)
        );
    }

    #[test]
    fn rejects_unknown_or_missing_extension() {
        assert_eq!(DocumentFormat::from_path(Path::new("slides.pptx")), None);
        assert_eq!(DocumentFormat::from_path(Path::new("README")), None);
    }
}
