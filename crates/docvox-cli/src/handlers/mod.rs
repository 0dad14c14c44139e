//! Command handlers.
//!
//! Each handler receives already-parsed arguments and, for commands that run
//! the pipeline, the composed `CliContext`.

pub mod check;
pub mod convert;
pub mod paths;
pub mod resume;
