//! Per-run file layout.

use std::path::{Path, PathBuf};

use super::error::PathError;

/// Suffix appended to the document stem for the working directory.
const WORK_DIR_SUFFIX: &str = "_temp";

/// Where one conversion run keeps its intermediate files and its result.
///
/// For `report.pdf` and output directory `out/`:
/// - working directory `out/report_temp/`
/// - final file `out/report.mp3`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunLayout {
    /// Transient directory holding `text_NNN.txt` / `part_NNN.mp3`.
    pub work_dir: PathBuf,
    /// Final concatenated audio file.
    pub output: PathBuf,
}

impl RunLayout {
    /// Derive the layout from the input document's file stem.
    pub fn for_document(input: &Path, output_dir: &Path) -> Result<Self, PathError> {
        let stem = input
            .file_stem()
            .and_then(|s| s.to_str())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| PathError::NoFileStem(input.to_path_buf()))?;

        Ok(Self {
            work_dir: output_dir.join(format!("{stem}{WORK_DIR_SUFFIX}")),
            output: output_dir.join(format!("{stem}.mp3")),
        })
    }

    /// Rebuild the layout from an existing working directory.
    ///
    /// `out/report_temp` maps back to `out/report.mp3`; a directory without
    /// the suffix keeps its own name.
    pub fn from_work_dir(work_dir: &Path) -> Result<Self, PathError> {
        let name = work_dir
            .file_name()
            .and_then(|s| s.to_str())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| PathError::NoFileStem(work_dir.to_path_buf()))?;
        let stem = name.strip_suffix(WORK_DIR_SUFFIX).unwrap_or(name);
        let parent = work_dir.parent().unwrap_or_else(|| Path::new("."));

        Ok(Self {
            work_dir: work_dir.to_path_buf(),
            output: parent.join(format!("{stem}.mp3")),
        })
    }

    /// Replace the final output path.
    #[must_use]
    pub fn with_output(mut self, output: PathBuf) -> Self {
        self.output = output;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_uses_document_stem() {
        let layout =
            RunLayout::for_document(Path::new("/docs/Annual Report.pdf"), Path::new("/out"))
                .unwrap();
        assert_eq!(layout.work_dir, PathBuf::from("/out/Annual Report_temp"));
        assert_eq!(layout.output, PathBuf::from("/out/Annual Report.mp3"));
    }

    #[test]
    fn layout_round_trips_through_work_dir() {
        let layout = RunLayout::from_work_dir(Path::new("/out/book_temp")).unwrap();
        assert_eq!(layout.output, PathBuf::from("/out/book.mp3"));
    }

    #[test]
    fn layout_requires_a_stem() {
        assert!(matches!(
            RunLayout::for_document(Path::new("/"), Path::new("/out")),
            Err(PathError::NoFileStem(_))
        ));
    }
}
