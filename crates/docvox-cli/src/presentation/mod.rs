//! Shared CLI presentation utilities.
//!
//! - Keep this module format-only: no pipeline decisions
//! - Everything goes to stderr except the final summary

pub mod events;
pub mod progress;
pub mod summary;

pub use events::ConsoleEvents;
pub use progress::CliProgress;
pub use summary::format_summary;
