//! Core error type for pipeline operations.

use thiserror::Error;

use crate::paths::PathError;
use crate::ports::{AssembleError, ExtractError};
use crate::settings::SettingsError;
use crate::store::StoreError;

/// Errors that abort a conversion run.
///
/// Per-chunk synthesis failures never appear here; they are contained by the
/// coordinator and surface only as invalid artifacts.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Extract(#[from] ExtractError),

    #[error("The document contains no words to convert")]
    EmptyDocument,

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Assemble(#[from] AssembleError),

    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error(transparent)]
    Path(#[from] PathError),

    #[error("Internal error: {0}")]
    Internal(String),
}
