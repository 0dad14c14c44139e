//! Final audio assembly port.

use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

/// Outcome of concatenating per-chunk artifacts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AssemblySummary {
    /// Artifacts appended to the output.
    pub segments_written: usize,
    /// Expected artifacts that were absent or undecodable.
    pub segments_skipped: usize,
}

/// Errors that stop the final file from being written.
#[derive(Debug, Error)]
pub enum AssembleError {
    #[error("Failed to read segment {path}: {source}")]
    ReadSegment {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    WriteOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Concatenates artifacts into the final file.
///
/// `segments` is the full ordered list of expected artifact paths for
/// indices `0..N`. Missing files are skipped silently: no padding and no gap
/// marker is inserted.
pub trait AssemblerPort: Send + Sync {
    fn assemble(&self, segments: &[PathBuf], output: &Path)
    -> Result<AssemblySummary, AssembleError>;
}
