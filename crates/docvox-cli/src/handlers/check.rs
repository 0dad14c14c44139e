//! Check command handler.
//!
//! Inspects a working directory without synthesizing anything.

use std::path::Path;

use anyhow::Result;
use docvox_core::{ChunkStore, Validator, WorkSet};

use crate::error::CliError;

/// Validation state of every chunk in a working directory.
pub struct CheckReport {
    pub chunks: usize,
    pub invalid: WorkSet,
    pub missing: WorkSet,
}

impl CheckReport {
    pub fn build(store: &ChunkStore, validator: &Validator) -> Self {
        let invalid = validator.find_invalid(store);
        let missing = invalid
            .iter()
            .filter(|&index| store.artifact(index).is_none())
            .collect();
        Self {
            chunks: store.len(),
            invalid,
            missing,
        }
    }

    pub fn to_json(&self, work_dir: &Path) -> serde_json::Value {
        serde_json::json!({
            "work_dir": work_dir,
            "chunks": self.chunks,
            "complete": self.chunks - self.invalid.len(),
            "invalid": self.invalid,
            "missing": self.missing,
        })
    }
}

/// Print which chunks would be resent by `resume`.
pub fn execute(work_dir: &Path, bytes_per_word: u64, json: bool) -> Result<()> {
    let store = ChunkStore::open(work_dir).map_err(CliError::from)?;
    let report = CheckReport::build(&store, &Validator::new(bytes_per_word));

    if json {
        println!("{}", serde_json::to_string_pretty(&report.to_json(work_dir))?);
        return Ok(());
    }

    println!("Working directory: {}", work_dir.display());
    println!(
        "Chunks: {} ({} complete, {} invalid)",
        report.chunks,
        report.chunks - report.invalid.len(),
        report.invalid.len()
    );
    if !report.invalid.is_empty() {
        println!("Invalid: {}", report.invalid);
        if !report.missing.is_empty() {
            println!("  no audio file: {}", report.missing);
        }
    }
    Ok(())
}
