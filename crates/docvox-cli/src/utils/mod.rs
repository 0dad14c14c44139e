//! Utility modules for CLI operations.

pub mod input;

pub use input::{ConsoleRetryPrompt, prompt_document_path, prompt_string};
