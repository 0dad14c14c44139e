//! CLI-specific error types and mappings.
//!
//! This module provides error types for the CLI adapter and mappings
//! from core errors to exit codes and user-facing messages.

use docvox_core::{CoreError, ExtractError, PathError, SettingsError, StoreError};
use thiserror::Error;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Core pipeline error without a more specific category.
    #[error("{0}")]
    Core(String),

    /// Argument parsing error.
    #[error("Invalid arguments: {0}")]
    Arguments(String),

    /// The input document could not be turned into text.
    #[error("{0}")]
    Document(String),

    /// IO error (file not found, permission denied, etc.).
    #[error("IO error: {0}")]
    Io(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl CliError {
    /// Map error to appropriate exit code.
    ///
    /// Exit codes follow Unix conventions:
    /// - 0: Success
    /// - 1: General error
    /// - 2: Misuse of shell command (invalid arguments)
    /// - 64-78: Reserved for specific error categories (see sysexits.h)
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Core(_) => 1,
            Self::Arguments(_) => 2, // EX_USAGE
            Self::Document(_) => 65, // EX_DATAERR
            Self::Io(_) => 74,       // EX_IOERR
            Self::Config(_) => 78,   // EX_CONFIG
        }
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Extract(e) => e.into(),
            CoreError::EmptyDocument => Self::Document(err.to_string()),
            CoreError::Store(e) => e.into(),
            CoreError::Assemble(e) => Self::Io(e.to_string()),
            CoreError::Settings(e) => e.into(),
            CoreError::Path(e) => e.into(),
            CoreError::Internal(msg) => Self::Core(msg),
        }
    }
}

impl From<ExtractError> for CliError {
    fn from(err: ExtractError) -> Self {
        match err {
            ExtractError::Unsupported { .. } | ExtractError::NotFound(_) => {
                Self::Arguments(err.to_string())
            }
            ExtractError::ToolMissing { .. } => Self::Config(err.to_string()),
            ExtractError::Io { .. } => Self::Io(err.to_string()),
            ExtractError::Pdf { .. } | ExtractError::Docx { .. } => Self::Document(err.to_string()),
        }
    }
}

impl From<StoreError> for CliError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Io { .. } => Self::Io(err.to_string()),
            StoreError::NonContiguous { .. } | StoreError::Empty(_) => {
                Self::Arguments(err.to_string())
            }
        }
    }
}

impl From<SettingsError> for CliError {
    fn from(err: SettingsError) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<PathError> for CliError {
    fn from(err: PathError) -> Self {
        match err {
            PathError::NoFileStem(_) | PathError::DirectoryNotFound(_) => {
                Self::Arguments(err.to_string())
            }
            _ => Self::Io(err.to_string()),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}
