//! User input utilities for interactive command-line prompts.
//!
//! This module provides functions for collecting the document path and the
//! manual retry indices from the operator.

use std::path::PathBuf;

use anyhow::{Context, Result};
use async_trait::async_trait;
use console::Term;
use docvox_core::{DocumentFormat, ManualRetryPrompt, WorkSet};

/// Prompts the user for a string input.
///
/// Displays a prompt message and waits for the user to enter text.
/// The input is read from stdin and returned with whitespace trimmed.
///
/// # Errors
///
/// Returns an error if reading from stdin fails.
pub fn prompt_string(prompt: &str) -> Result<String> {
    let term = Term::stderr();
    term.write_str(&format!("{prompt}: "))
        .context("Failed to write prompt")?;
    let input = term.read_line().context("Failed to read user input")?;
    Ok(input.trim().to_string())
}

/// Ask for the document to convert.
///
/// Surrounding quotes (as left by drag-and-drop into a terminal) are removed.
/// An empty answer is an error.
pub fn prompt_document_path() -> Result<PathBuf> {
    let extensions = DocumentFormat::supported_extensions().join(", ");
    let answer = prompt_string(&format!("Document to convert ({extensions})"))?;
    let cleaned = strip_quotes(&answer);
    anyhow::ensure!(!cleaned.is_empty(), "No document selected");
    Ok(PathBuf::from(cleaned))
}

fn strip_quotes(input: &str) -> &str {
    let trimmed = input.trim();
    for quote in ['"', '\''] {
        if let Some(inner) = trimmed
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner.trim();
        }
    }
    trimmed
}

/// Reads the manual retry line from the terminal.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleRetryPrompt;

#[async_trait]
impl ManualRetryPrompt for ConsoleRetryPrompt {
    async fn request_indices(&self, unresolved: &WorkSet) -> std::io::Result<Option<String>> {
        let message = format!(
            "Chunks still failing: {unresolved}\nIndices to retry once more (comma-separated, empty to skip)"
        );
        let line = tokio::task::spawn_blocking(move || {
            let term = Term::stderr();
            term.write_line("")?;
            term.write_str(&format!("{message}: "))?;
            term.read_line()
        })
        .await
        .map_err(std::io::Error::other)??;

        Ok(Some(line))
    }
}
