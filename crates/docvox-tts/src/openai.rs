//! OpenAI-compatible `/v1/audio/speech` adapter.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use docvox_core::{SynthesisError, SynthesisPort};
use serde::Serialize;
use tracing::debug;

use crate::edge::excerpt;

const SPEECH_PATH: &str = "/v1/audio/speech";
const CONNECT_TIMEOUT: Duration = Duration::from_secs(15);
const BODY_EXCERPT: usize = 300;

/// Request body for the speech route.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct SpeechRequest<'a> {
    pub model: &'a str,
    pub input: &'a str,
    pub voice: &'a str,
    pub response_format: &'a str,
}

/// Configuration for [`OpenAiSpeechClient`].
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    pub base_url: String,
    pub model: String,
    pub api_key: Option<String>,
}

/// Posts each chunk to an OpenAI-compatible speech endpoint and saves the
/// returned MP3 bytes.
pub struct OpenAiSpeechClient {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: Option<String>,
}

impl OpenAiSpeechClient {
    pub fn new(config: OpenAiConfig) -> Result<Self, SynthesisError> {
        let client = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .map_err(|e| SynthesisError::Unavailable(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint: speech_url(&config.base_url),
            model: config.model,
            api_key: config.api_key.filter(|k| !k.is_empty()),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

/// Join the base URL and the speech route, tolerating a trailing slash or a
/// base that already ends in `/v1`.
pub fn speech_url(base_url: &str) -> String {
    let base = base_url.trim_end_matches('/');
    match base.strip_suffix("/v1") {
        Some(root) => format!("{root}{SPEECH_PATH}"),
        None => format!("{base}{SPEECH_PATH}"),
    }
}

#[async_trait]
impl SynthesisPort for OpenAiSpeechClient {
    async fn synthesize(&self, text: &str, voice: &str, output: &Path) -> Result<(), SynthesisError> {
        let body = SpeechRequest {
            model: &self.model,
            input: text,
            voice,
            response_format: "mp3",
        };

        let mut request = self.client.post(&self.endpoint).json(&body);
        if let Some(ref key) = self.api_key {
            request = request.header("Authorization", format!("Bearer {key}"));
        }

        let response = request
            .send()
            .await
            .map_err(|e| SynthesisError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(SynthesisError::Request(format!(
                "{} returned {status}: {}",
                self.endpoint,
                excerpt(detail.trim(), BODY_EXCERPT)
            )));
        }

        let audio = response
            .bytes()
            .await
            .map_err(|e| SynthesisError::Request(format!("failed to read audio body: {e}")))?;
        debug!(bytes = audio.len(), output = %output.display(), "Speech received");

        tokio::fs::write(output, &audio).await?;
        Ok(())
    }

    fn name(&self) -> &str {
        "openai"
    }
}
