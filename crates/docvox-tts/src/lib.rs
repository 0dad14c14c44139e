#![doc = include_str!(concat!(env!("OUT_DIR"), "/README_GENERATED.md"))]
#![deny(unused_crate_dependencies)]

pub mod backend;
pub mod edge;
pub mod openai;

pub use backend::build_synthesizer;
pub use edge::{EDGE_TTS_BIN_ENV, EdgeTtsClient};
pub use openai::{OpenAiConfig, OpenAiSpeechClient, SpeechRequest, speech_url};

#[cfg(test)]
use tempfile as _;
