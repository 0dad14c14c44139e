//! Concatenation of per-chunk MP3 segments.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use docvox_core::{AssembleError, AssemblerPort, AssemblySummary};
use tracing::{debug, warn};

use crate::decode::decode_frames;
use crate::id3::strip_tags;

/// Joins MP3 segments by concatenating their decodable frames.
#[derive(Debug, Default, Clone, Copy)]
pub struct Mp3Assembler;

impl Mp3Assembler {
    pub const fn new() -> Self {
        Self
    }
}

/// `<output>.part`, next to the final file.
fn staging_path(output: &Path) -> PathBuf {
    let mut name = output
        .file_name()
        .map_or_else(|| OsString::from("output"), OsString::from);
    name.push(".part");
    output.with_file_name(name)
}

impl AssemblerPort for Mp3Assembler {
    fn assemble(
        &self,
        segments: &[PathBuf],
        output: &Path,
    ) -> Result<AssemblySummary, AssembleError> {
        let write_err = |source: io::Error| AssembleError::WriteOutput {
            path: output.to_path_buf(),
            source,
        };

        if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(write_err)?;
        }

        let staging = staging_path(output);
        let result = write_segments(segments, &staging);
        let summary = match result {
            Ok(summary) => summary,
            Err(e) => {
                let _ = fs::remove_file(&staging);
                return Err(e);
            }
        };

        fs::rename(&staging, output).map_err(write_err)?;
        Ok(summary)
    }
}

fn write_segments(segments: &[PathBuf], staging: &Path) -> Result<AssemblySummary, AssembleError> {
    let write_err = |source: io::Error| AssembleError::WriteOutput {
        path: staging.to_path_buf(),
        source,
    };

    let mut out = BufWriter::new(File::create(staging).map_err(write_err)?);
    let mut summary = AssemblySummary::default();

    for segment in segments {
        let data = match fs::read(segment) {
            Ok(data) => data,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(segment = %segment.display(), "Segment missing, omitted");
                summary.segments_skipped += 1;
                continue;
            }
            Err(source) => {
                return Err(AssembleError::ReadSegment {
                    path: segment.clone(),
                    source,
                });
            }
        };

        let frames = match decode_frames(strip_tags(&data)) {
            Ok(frames) => frames,
            Err(e) => {
                warn!(
                    segment = %segment.display(),
                    bytes = data.len(),
                    error = %e,
                    "Segment is not decodable MP3, omitted"
                );
                summary.segments_skipped += 1;
                continue;
            }
        };
        if frames.rejected > 0 {
            debug!(
                segment = %segment.display(),
                kept = frames.frames,
                rejected = frames.rejected,
                "Dropped frames the decoder refused"
            );
        }

        out.write_all(&frames.data).map_err(write_err)?;
        summary.segments_written += 1;
    }

    out.flush().map_err(write_err)?;
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn staging_sits_next_to_output() {
        assert_eq!(
            staging_path(Path::new("/out/book.mp3")),
            PathBuf::from("/out/book.mp3.part")
        );
    }
}
