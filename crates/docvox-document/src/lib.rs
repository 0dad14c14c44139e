#![doc = include_str!(concat!(env!("OUT_DIR"), "/README_GENERATED.md"))]
#![deny(unused_crate_dependencies)]

pub mod docx;
pub mod pdf;
pub mod reader;

pub use docx::extract_docx;
pub use pdf::{PDFTOTEXT_BIN_ENV, extract_pdf, find_pdftotext};
pub use reader::DefaultDocumentReader;

#[cfg(test)]
use tempfile as _;
