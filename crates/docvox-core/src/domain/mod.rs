//! Domain types for the chunked conversion pipeline.
//!
//! These are pure data types with no filesystem or network dependencies.
//! Artifact state is never cached here; see [`crate::store`] for how it is
//! read back from disk.

mod chunk;
mod format;
mod work_set;

pub use chunk::{AudioArtifact, TextChunk};
pub use format::DocumentFormat;
pub use work_set::WorkSet;
