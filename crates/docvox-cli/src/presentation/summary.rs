//! End-of-run summary.

use std::fmt::Write;

use docvox_core::ConversionSummary;

/// Human-readable summary printed after a conversion or resume.
pub fn format_summary(summary: &ConversionSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Output:   {}", summary.output_path.display());
    let _ = writeln!(
        out,
        "Segments: {}/{} assembled",
        summary.segments_assembled, summary.chunk_count
    );
    if summary.auto_rounds_run > 0 {
        let _ = writeln!(out, "Retries:  {} automatic round(s)", summary.auto_rounds_run);
    }
    if let Some(ref manual) = summary.manual_round {
        let _ = writeln!(out, "Manual:   resent {manual}");
    }
    if !summary.unresolved.is_empty() {
        let _ = writeln!(
            out,
            "Unresolved after automatic retries: {}",
            summary.unresolved
        );
    }
    if summary.segments_skipped > 0 {
        let _ = writeln!(
            out,
            "Warning:  {} chunk(s) missing from the output",
            summary.segments_skipped
        );
    }
    if !summary.work_dir_removed {
        let _ = writeln!(out, "Note:     working directory could not be removed");
    }
    out
}
