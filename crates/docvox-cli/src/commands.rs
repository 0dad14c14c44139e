//! CLI subcommands and their shared run options.

use std::path::PathBuf;

use clap::{Args, Subcommand};
use docvox_core::{SettingsUpdate, SynthesisBackend};

#[derive(Subcommand)]
pub enum Commands {
    /// Convert a document into `<output dir>/<name>.mp3`
    Convert {
        /// PDF, DOCX or TXT file (prompted for when omitted)
        file: Option<PathBuf>,

        #[command(flatten)]
        options: RunOptions,
    },

    /// Finish a run from its `<name>_temp` working directory
    Resume {
        /// Working directory left by an interrupted run
        work_dir: PathBuf,

        /// Final file (default: `<name>.mp3` next to the working directory)
        #[arg(long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        options: RunOptions,
    },

    /// Report which chunks in a working directory still need synthesis
    Check {
        /// Working directory to inspect
        work_dir: PathBuf,

        /// Minimum audio bytes per word
        #[arg(long, env = "DOCVOX_BYTES_PER_WORD")]
        bytes_per_word: Option<u64>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show resolved directories and the settings file location
    Paths,
}

/// Settings that can be given per invocation.
///
/// Every flag also reads a `DOCVOX_*` environment variable; an explicit flag
/// wins over the variable.
#[derive(Args, Debug, Default, Clone)]
pub struct RunOptions {
    /// Words per chunk
    #[arg(long, env = "DOCVOX_CHUNK_WORDS")]
    pub chunk_words: Option<usize>,

    /// Simultaneous synthesis calls
    #[arg(short = 'j', long, env = "DOCVOX_MAX_CONCURRENCY")]
    pub max_concurrency: Option<usize>,

    /// Automatic retry rounds after the first pass
    #[arg(long, env = "DOCVOX_MAX_RETRIES")]
    pub max_retries: Option<u32>,

    /// Minimum audio bytes per word for a chunk to count as complete
    #[arg(long, env = "DOCVOX_BYTES_PER_WORD")]
    pub bytes_per_word: Option<u64>,

    /// Voice identifier understood by the backend
    #[arg(long, env = "DOCVOX_VOICE")]
    pub voice: Option<String>,

    /// Directory for the working directory and the final file
    #[arg(short = 'o', long, env = "DOCVOX_OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// Synthesis backend: edge-tts or openai
    #[arg(long, env = "DOCVOX_BACKEND")]
    pub backend: Option<SynthesisBackend>,

    /// Give up on a single synthesis call after this many seconds
    #[arg(long, env = "DOCVOX_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,

    /// Base URL of an OpenAI-compatible speech server
    #[arg(long, env = "DOCVOX_OPENAI_BASE_URL")]
    pub openai_base_url: Option<String>,

    /// Model name for the OpenAI-compatible backend
    #[arg(long, env = "DOCVOX_OPENAI_MODEL")]
    pub openai_model: Option<String>,

    /// API key for the OpenAI-compatible backend
    #[arg(long, env = "DOCVOX_OPENAI_API_KEY", hide_env_values = true)]
    pub openai_api_key: Option<String>,

    /// Never ask for manual retry indices
    #[arg(long)]
    pub no_prompt: bool,
}

impl RunOptions {
    /// Settings changes requested on the command line or environment.
    pub fn to_update(&self) -> SettingsUpdate {
        SettingsUpdate {
            chunk_words: self.chunk_words.map(Some),
            max_concurrency: self.max_concurrency.map(Some),
            max_retries: self.max_retries.map(Some),
            bytes_per_word: self.bytes_per_word.map(Some),
            voice: self.voice.clone().map(Some),
            output_dir: self
                .output_dir
                .as_ref()
                .map(|dir| Some(dir.to_string_lossy().into_owned())),
            backend: self.backend.map(Some),
            openai_base_url: self.openai_base_url.clone().map(Some),
            openai_model: self.openai_model.clone().map(Some),
            openai_api_key: self.openai_api_key.clone().map(Some),
            synthesis_timeout_secs: self.timeout_secs.map(Some),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Cli;
    use clap::Parser;

    #[test]
    fn convert_accepts_file_and_options() {
        let cli = Cli::parse_from([
            "docvox",
            "convert",
            "book.pdf",
            "--chunk-words",
            "120",
            "-j",
            "8",
            "--backend",
            "openai",
            "--no-prompt",
        ]);
        let Some(Commands::Convert { file, options }) = cli.command else {
            panic!("expected convert");
        };
        assert_eq!(file, Some(PathBuf::from("book.pdf")));
        assert_eq!(options.chunk_words, Some(120));
        assert_eq!(options.max_concurrency, Some(8));
        assert_eq!(options.backend, Some(SynthesisBackend::OpenAi));
        assert!(options.no_prompt);
    }

    #[test]
    fn convert_file_is_optional() {
        let cli = Cli::parse_from(["docvox", "convert"]);
        assert!(matches!(cli.command, Some(Commands::Convert { file: None, .. })));
    }

    #[test]
    fn unknown_backend_is_rejected() {
        assert!(Cli::try_parse_from(["docvox", "convert", "--backend", "festival"]).is_err());
    }

    #[test]
    fn update_only_touches_given_fields() {
        let options = RunOptions {
            voice: Some("en-US-AriaNeural".into()),
            timeout_secs: Some(30),
            ..RunOptions::default()
        };
        let update = options.to_update();
        assert_eq!(update.voice, Some(Some("en-US-AriaNeural".to_string())));
        assert_eq!(update.synthesis_timeout_secs, Some(Some(30)));
        assert_eq!(update.chunk_words, None);
        assert_eq!(update.backend, None);
    }

    #[test]
    fn resume_takes_output_override() {
        let cli = Cli::parse_from(["docvox", "resume", "/tmp/book_temp", "--output", "/tmp/x.mp3"]);
        let Some(Commands::Resume { work_dir, output, .. }) = cli.command else {
            panic!("expected resume");
        };
        assert_eq!(work_dir, PathBuf::from("/tmp/book_temp"));
        assert_eq!(output, Some(PathBuf::from("/tmp/x.mp3")));
    }
}
