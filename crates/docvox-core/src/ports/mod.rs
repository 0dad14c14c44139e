//! Port definitions (trait abstractions) for external collaborators.
//!
//! Ports define the interfaces that the pipeline expects from adapters.
//! They contain no implementation details and use only domain types.
//!
//! # Design Rules
//!
//! - No process, HTTP, or archive types in any signature
//! - Every port that the pipeline can run without has a no-op implementation
//! - Failures of a single synthesis call never cross the coordinator boundary

pub mod assembler;
pub mod document;
pub mod event_emitter;
pub mod manual_prompt;
pub mod progress;
pub mod synthesis;

pub use assembler::{AssembleError, AssemblerPort, AssemblySummary};
pub use document::{DocumentReaderPort, ExtractError};
pub use event_emitter::{NoopEmitter, RunEventEmitter};
pub use manual_prompt::{ManualRetryPrompt, NoManualRetry};
pub use progress::{NoopProgress, ProgressReporter};
pub use synthesis::{SynthesisError, SynthesisPort};

#[cfg(test)]
pub use manual_prompt::MockManualRetryPrompt;
