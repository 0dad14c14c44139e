//! Backend selection from settings.

use std::sync::Arc;

use docvox_core::{Settings, SynthesisBackend, SynthesisError, SynthesisPort};
use tracing::info;

use crate::edge::EdgeTtsClient;
use crate::openai::{OpenAiConfig, OpenAiSpeechClient};

/// Build the synthesis adapter named by `settings.backend`.
pub fn build_synthesizer(settings: &Settings) -> Result<Arc<dyn SynthesisPort>, SynthesisError> {
    match settings.effective_backend() {
        SynthesisBackend::EdgeTts => {
            let client = EdgeTtsClient::locate()?;
            info!(binary = %client.binary().display(), "Using edge-tts");
            Ok(Arc::new(client))
        }
        SynthesisBackend::OpenAi => {
            let client = OpenAiSpeechClient::new(OpenAiConfig {
                base_url: settings.effective_openai_base_url().to_string(),
                model: settings.effective_openai_model().to_string(),
                api_key: settings.openai_api_key.clone(),
            })?;
            info!(endpoint = client.endpoint(), "Using OpenAI-compatible speech endpoint");
            Ok(Arc::new(client))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openai_backend_needs_no_binary() {
        let settings = Settings {
            backend: Some(SynthesisBackend::OpenAi),
            openai_base_url: Some("http://127.0.0.1:9".into()),
            ..Settings::with_defaults()
        };
        let synth = build_synthesizer(&settings).unwrap();
        assert_eq!(synth.name(), "openai");
    }
}
