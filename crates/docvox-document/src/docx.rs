//! Text extraction from WordprocessingML (`.docx`).
//!
//! A `.docx` file is a zip container; the body lives in `word/document.xml`.
//! Each `<w:p>` paragraph's `<w:t>` runs are concatenated, tabs and breaks
//! become spaces, and non-empty trimmed paragraphs are joined with a single
//! space.

use std::borrow::Cow;
use std::fs::File;
use std::io::{Read, Seek};
use std::path::Path;

use docvox_core::ExtractError;
use quick_xml::Reader;
use quick_xml::events::Event;

const DOCUMENT_PART: &str = "word/document.xml";

/// Read `path` and return its paragraph text.
pub fn extract_docx(path: &Path) -> Result<String, ExtractError> {
    let docx_err = |reason: String| ExtractError::Docx {
        path: path.to_path_buf(),
        reason,
    };
    let file = File::open(path).map_err(|e| ExtractError::io(path, e))?;
    let xml = read_document_part(file).map_err(docx_err)?;
    document_text(&xml).map_err(docx_err)
}

fn read_document_part<R: Read + Seek>(reader: R) -> Result<String, String> {
    let mut archive = zip::ZipArchive::new(reader).map_err(|e| format!("not a zip container: {e}"))?;
    let mut part = archive
        .by_name(DOCUMENT_PART)
        .map_err(|e| format!("missing {DOCUMENT_PART}: {e}"))?;

    let mut xml = String::new();
    part.read_to_string(&mut xml)
        .map_err(|e| format!("failed to read {DOCUMENT_PART}: {e}"))?;
    Ok(xml)
}

/// Paragraph text accumulated while walking the body.
#[derive(Default)]
struct Paragraphs {
    done: Vec<String>,
    current: String,
}

impl Paragraphs {
    fn close(&mut self) {
        let text = self.current.trim();
        if !text.is_empty() {
            self.done.push(text.to_string());
        }
        self.current.clear();
    }

    fn into_text(mut self) -> String {
        self.close();
        self.done.join(" ")
    }
}

fn document_text(xml: &str) -> Result<String, String> {
    let mut reader = Reader::from_str(xml);
    let mut paragraphs = Paragraphs::default();
    let mut in_run_text = false;

    loop {
        let event = reader.read_event().map_err(|e| {
            format!(
                "malformed {DOCUMENT_PART} at byte {}: {e}",
                reader.error_position()
            )
        })?;
        match event {
            Event::Start(e) => {
                if e.local_name().as_ref() == b"t" {
                    in_run_text = true;
                }
            }
            Event::End(e) => match e.local_name().as_ref() {
                b"t" => in_run_text = false,
                b"p" => paragraphs.close(),
                _ => {}
            },
            Event::Empty(e) => {
                if matches!(e.local_name().as_ref(), b"tab" | b"br" | b"cr") {
                    paragraphs.current.push(' ');
                }
            }
            Event::Text(text) if in_run_text => {
                // Unknown entity references are kept as written
                let decoded = text
                    .unescape()
                    .unwrap_or_else(|_| Cow::Owned(String::from_utf8_lossy(&text).into_owned()));
                paragraphs.current.push_str(&decoded);
            }
            Event::CData(data) if in_run_text => {
                paragraphs
                    .current
                    .push_str(&String::from_utf8_lossy(&data.into_inner()));
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(paragraphs.into_text())
}
