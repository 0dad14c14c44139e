//! Common test utilities.
//!
//! Scripted synthesis and assembly adapters shared by the pipeline tests.

pub mod fixtures;
