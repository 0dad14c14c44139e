//! Main CLI parser and top-level argument handling.
//!
//! This module defines the root CLI structure with global options.

use std::path::PathBuf;

use clap::Parser;

use crate::commands::Commands;

/// Command-line interface for turning documents into audiobooks.
#[derive(Parser)]
#[command(name = "docvox")]
#[command(about = "Convert PDF, DOCX and text documents into a single MP3")]
#[command(version)]
pub struct Cli {
    /// JSON settings file to use instead of the default location
    #[arg(long = "config", global = true, env = "DOCVOX_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}
