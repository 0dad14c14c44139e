//! Settings domain types and validation.
//!
//! This module contains the run configuration shared by every adapter.
//! Settings are plain data: the CLI layers a JSON file, environment, and
//! flags on top of [`Settings::with_defaults`] and hands the result to the
//! pipeline as a [`crate::PipelineConfig`].

use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default number of words per chunk.
pub const DEFAULT_CHUNK_WORDS: usize = 300;

/// Default ceiling on simultaneous synthesis calls.
pub const DEFAULT_MAX_CONCURRENCY: usize = 5;

/// Default number of automatic retry rounds after the initial pass.
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Default minimum audio bytes expected per spoken word.
pub const DEFAULT_BYTES_PER_WORD: u64 = 1500;

/// Default synthesis voice.
pub const DEFAULT_VOICE: &str = "vi-VN-HoaiMyNeural";

/// Default base URL for the OpenAI-compatible speech backend.
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com";

/// Default model for the OpenAI-compatible speech backend.
pub const DEFAULT_OPENAI_MODEL: &str = "tts-1";

/// Which synthesis adapter to use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SynthesisBackend {
    /// The `edge-tts` command-line tool.
    #[default]
    EdgeTts,
    /// An OpenAI-compatible `/v1/audio/speech` endpoint.
    #[serde(rename = "openai")]
    OpenAi,
}

impl fmt::Display for SynthesisBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EdgeTts => write!(f, "edge-tts"),
            Self::OpenAi => write!(f, "openai"),
        }
    }
}

impl FromStr for SynthesisBackend {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "edge-tts" | "edge" => Ok(Self::EdgeTts),
            "openai" => Ok(Self::OpenAi),
            other => Err(SettingsError::UnknownBackend(other.to_string())),
        }
    }
}

/// Application settings structure.
///
/// All fields are optional to support partial updates and graceful defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Words per chunk (controls call count and per-call latency).
    pub chunk_words: Option<usize>,

    /// Hard ceiling on simultaneous synthesis calls (1-64).
    pub max_concurrency: Option<usize>,

    /// Automatic retry rounds after the initial pass (0-20).
    pub max_retries: Option<u32>,

    /// Minimum bytes of audio expected per word. Too low accepts truncated
    /// audio, too high causes needless retries.
    pub bytes_per_word: Option<u64>,

    /// Voice identifier passed to the synthesis backend.
    pub voice: Option<String>,

    /// Directory receiving the working directory and the final file.
    pub output_dir: Option<String>,

    /// Synthesis adapter.
    pub backend: Option<SynthesisBackend>,

    /// Base URL of the OpenAI-compatible speech endpoint.
    pub openai_base_url: Option<String>,

    /// Model name for the OpenAI-compatible speech endpoint.
    pub openai_model: Option<String>,

    /// Bearer token for the OpenAI-compatible speech endpoint.
    pub openai_api_key: Option<String>,

    /// Per-call synthesis timeout in seconds. `None` waits indefinitely.
    pub synthesis_timeout_secs: Option<u64>,
}

impl Settings {
    /// Create settings with sensible defaults.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self {
            chunk_words: Some(DEFAULT_CHUNK_WORDS),
            max_concurrency: Some(DEFAULT_MAX_CONCURRENCY),
            max_retries: Some(DEFAULT_MAX_RETRIES),
            bytes_per_word: Some(DEFAULT_BYTES_PER_WORD),
            voice: Some(DEFAULT_VOICE.to_string()),
            output_dir: None,
            backend: Some(SynthesisBackend::EdgeTts),
            openai_base_url: Some(DEFAULT_OPENAI_BASE_URL.to_string()),
            openai_model: Some(DEFAULT_OPENAI_MODEL.to_string()),
            openai_api_key: None,
            synthesis_timeout_secs: None,
        }
    }

    /// Load settings from a JSON file.
    ///
    /// Missing fields stay `None`; merge the result over
    /// [`Settings::with_defaults`] with [`Settings::overlay`].
    pub fn load_file(path: &Path) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(path).map_err(|e| SettingsError::ReadFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        serde_json::from_str(&content).map_err(|e| SettingsError::ParseFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }

    #[must_use]
    pub const fn effective_chunk_words(&self) -> usize {
        match self.chunk_words {
            Some(words) => words,
            None => DEFAULT_CHUNK_WORDS,
        }
    }

    #[must_use]
    pub const fn effective_max_concurrency(&self) -> usize {
        match self.max_concurrency {
            Some(limit) => limit,
            None => DEFAULT_MAX_CONCURRENCY,
        }
    }

    #[must_use]
    pub const fn effective_max_retries(&self) -> u32 {
        match self.max_retries {
            Some(retries) => retries,
            None => DEFAULT_MAX_RETRIES,
        }
    }

    #[must_use]
    pub const fn effective_bytes_per_word(&self) -> u64 {
        match self.bytes_per_word {
            Some(bytes) => bytes,
            None => DEFAULT_BYTES_PER_WORD,
        }
    }

    #[must_use]
    pub fn effective_voice(&self) -> &str {
        self.voice.as_deref().unwrap_or(DEFAULT_VOICE)
    }

    #[must_use]
    pub fn effective_backend(&self) -> SynthesisBackend {
        self.backend.unwrap_or_default()
    }

    #[must_use]
    pub fn effective_openai_base_url(&self) -> &str {
        self.openai_base_url
            .as_deref()
            .unwrap_or(DEFAULT_OPENAI_BASE_URL)
    }

    #[must_use]
    pub fn effective_openai_model(&self) -> &str {
        self.openai_model.as_deref().unwrap_or(DEFAULT_OPENAI_MODEL)
    }

    #[must_use]
    pub fn synthesis_timeout(&self) -> Option<Duration> {
        self.synthesis_timeout_secs.map(Duration::from_secs)
    }

    /// Take every field that is set in `other`, keeping ours otherwise.
    ///
    /// Used to layer a sparse settings file over the defaults.
    pub fn overlay(&mut self, other: &Self) {
        macro_rules! take_some {
            ($($field:ident),* $(,)?) => {
                $(if other.$field.is_some() {
                    self.$field.clone_from(&other.$field);
                })*
            };
        }
        take_some!(
            chunk_words,
            max_concurrency,
            max_retries,
            bytes_per_word,
            voice,
            output_dir,
            backend,
            openai_base_url,
            openai_model,
            openai_api_key,
            synthesis_timeout_secs,
        );
    }

    /// Merge another settings into this one, only updating fields that are Some.
    pub fn merge(&mut self, other: &SettingsUpdate) {
        if let Some(words) = other.chunk_words {
            self.chunk_words = words;
        }
        if let Some(limit) = other.max_concurrency {
            self.max_concurrency = limit;
        }
        if let Some(retries) = other.max_retries {
            self.max_retries = retries;
        }
        if let Some(bytes) = other.bytes_per_word {
            self.bytes_per_word = bytes;
        }
        if let Some(ref voice) = other.voice {
            self.voice.clone_from(voice);
        }
        if let Some(ref dir) = other.output_dir {
            self.output_dir.clone_from(dir);
        }
        if let Some(backend) = other.backend {
            self.backend = backend;
        }
        if let Some(ref url) = other.openai_base_url {
            self.openai_base_url.clone_from(url);
        }
        if let Some(ref model) = other.openai_model {
            self.openai_model.clone_from(model);
        }
        if let Some(ref key) = other.openai_api_key {
            self.openai_api_key.clone_from(key);
        }
        if let Some(timeout) = other.synthesis_timeout_secs {
            self.synthesis_timeout_secs = timeout;
        }
    }
}

/// Partial settings update.
///
/// Each field is `Option<Option<T>>`:
/// - `None` = don't change this field
/// - `Some(None)` = set field to None/null
/// - `Some(Some(value))` = set field to value
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SettingsUpdate {
    pub chunk_words: Option<Option<usize>>,
    pub max_concurrency: Option<Option<usize>>,
    pub max_retries: Option<Option<u32>>,
    pub bytes_per_word: Option<Option<u64>>,
    pub voice: Option<Option<String>>,
    pub output_dir: Option<Option<String>>,
    pub backend: Option<Option<SynthesisBackend>>,
    pub openai_base_url: Option<Option<String>>,
    pub openai_model: Option<Option<String>>,
    pub openai_api_key: Option<Option<String>>,
    pub synthesis_timeout_secs: Option<Option<u64>>,
}

/// Settings validation error.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SettingsError {
    #[error("Chunk word count must be between 1 and 5,000, got {0}")]
    InvalidChunkWords(usize),

    #[error("Max concurrency must be between 1 and 64, got {0}")]
    InvalidConcurrency(usize),

    #[error("Max retries must be between 0 and 20, got {0}")]
    InvalidRetries(u32),

    #[error("Bytes per word must be at least 1")]
    InvalidBytesPerWord,

    #[error("Synthesis timeout must be at least 1 second")]
    InvalidTimeout,

    #[error("Voice cannot be empty")]
    EmptyVoice,

    #[error("Output directory cannot be empty")]
    EmptyOutputDir,

    #[error("Unknown synthesis backend '{0}' (expected 'edge-tts' or 'openai')")]
    UnknownBackend(String),

    #[error("Failed to read settings file {path}: {reason}")]
    ReadFailed { path: String, reason: String },

    #[error("Failed to parse settings file {path}: {reason}")]
    ParseFailed { path: String, reason: String },
}

/// Validate settings values.
pub fn validate_settings(settings: &Settings) -> Result<(), SettingsError> {
    if let Some(words) = settings.chunk_words {
        if !(1..=5_000).contains(&words) {
            return Err(SettingsError::InvalidChunkWords(words));
        }
    }

    if let Some(limit) = settings.max_concurrency {
        if !(1..=64).contains(&limit) {
            return Err(SettingsError::InvalidConcurrency(limit));
        }
    }

    if let Some(retries) = settings.max_retries {
        if retries > 20 {
            return Err(SettingsError::InvalidRetries(retries));
        }
    }

    if settings.bytes_per_word == Some(0) {
        return Err(SettingsError::InvalidBytesPerWord);
    }

    if settings.synthesis_timeout_secs == Some(0) {
        return Err(SettingsError::InvalidTimeout);
    }

    if settings.voice.as_ref().is_some_and(|v| v.trim().is_empty()) {
        return Err(SettingsError::EmptyVoice);
    }

    if settings
        .output_dir
        .as_ref()
        .is_some_and(|p| p.trim().is_empty())
    {
        return Err(SettingsError::EmptyOutputDir);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::with_defaults();
        assert_eq!(settings.chunk_words, Some(DEFAULT_CHUNK_WORDS));
        assert_eq!(settings.max_concurrency, Some(DEFAULT_MAX_CONCURRENCY));
        assert_eq!(settings.max_retries, Some(DEFAULT_MAX_RETRIES));
        assert_eq!(settings.bytes_per_word, Some(DEFAULT_BYTES_PER_WORD));
        assert_eq!(settings.effective_voice(), DEFAULT_VOICE);
        assert_eq!(settings.effective_backend(), SynthesisBackend::EdgeTts);
        assert_eq!(settings.synthesis_timeout(), None);
    }

    #[test]
    fn test_validate_settings_valid() {
        assert!(validate_settings(&Settings::with_defaults()).is_ok());
        assert!(validate_settings(&Settings::default()).is_ok());
    }

    #[test]
    fn test_validate_chunk_words_zero() {
        let settings = Settings {
            chunk_words: Some(0),
            ..Default::default()
        };
        assert!(matches!(
            validate_settings(&settings),
            Err(SettingsError::InvalidChunkWords(0))
        ));
    }

    #[test]
    fn test_validate_concurrency_bounds() {
        for bad in [0, 65] {
            let settings = Settings {
                max_concurrency: Some(bad),
                ..Default::default()
            };
            assert!(matches!(
                validate_settings(&settings),
                Err(SettingsError::InvalidConcurrency(n)) if n == bad
            ));
        }
    }

    #[test]
    fn test_validate_retries_zero_allowed() {
        let settings = Settings {
            max_retries: Some(0),
            ..Default::default()
        };
        assert!(validate_settings(&settings).is_ok());

        let settings = Settings {
            max_retries: Some(21),
            ..Default::default()
        };
        assert!(matches!(
            validate_settings(&settings),
            Err(SettingsError::InvalidRetries(21))
        ));
    }

    #[test]
    fn test_validate_empty_voice_and_dir() {
        let settings = Settings {
            voice: Some("  ".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            validate_settings(&settings),
            Err(SettingsError::EmptyVoice)
        ));

        let settings = Settings {
            output_dir: Some(String::new()),
            ..Default::default()
        };
        assert!(matches!(
            validate_settings(&settings),
            Err(SettingsError::EmptyOutputDir)
        ));
    }

    #[test]
    fn test_merge_settings() {
        let mut settings = Settings::with_defaults();
        let update = SettingsUpdate {
            chunk_words: Some(Some(120)),
            voice: Some(Some("en-US-AriaNeural".to_string())),
            openai_api_key: Some(None),
            ..Default::default()
        };
        settings.merge(&update);

        assert_eq!(settings.chunk_words, Some(120));
        assert_eq!(settings.effective_voice(), "en-US-AriaNeural");
        assert_eq!(settings.openai_api_key, None);
        assert_eq!(settings.max_retries, Some(DEFAULT_MAX_RETRIES)); // Unchanged
    }

    #[test]
    fn test_overlay_takes_only_set_fields() {
        let mut settings = Settings::with_defaults();
        let file: Settings =
            serde_json::from_str(r#"{ "max_concurrency": 2, "backend": "openai" }"#).unwrap();
        settings.overlay(&file);

        assert_eq!(settings.max_concurrency, Some(2));
        assert_eq!(settings.effective_backend(), SynthesisBackend::OpenAi);
        assert_eq!(settings.chunk_words, Some(DEFAULT_CHUNK_WORDS));
    }

    #[test]
    fn test_backend_from_str() {
        assert_eq!(
            "Edge-TTS".parse::<SynthesisBackend>().unwrap(),
            SynthesisBackend::EdgeTts
        );
        assert_eq!(
            "openai".parse::<SynthesisBackend>().unwrap(),
            SynthesisBackend::OpenAi
        );
        assert!("polly".parse::<SynthesisBackend>().is_err());
    }

    #[test]
    fn test_load_file_reports_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert!(matches!(
            Settings::load_file(&path),
            Err(SettingsError::ParseFailed { .. })
        ));
    }
}
