#![doc = include_str!(concat!(env!("OUT_DIR"), "/README_GENERATED.md"))]
#![deny(unused_crate_dependencies)]

pub mod decode;
pub mod id3;
pub mod mp3;

pub use mp3::Mp3Assembler;

#[cfg(test)]
use tempfile as _;
