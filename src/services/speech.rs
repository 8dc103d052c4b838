use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::info;

use super::error::ServiceError;
use crate::audio::AudioRef;

/// Text-to-speech service.
#[async_trait::async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Synthesize spoken audio for the given text.
    ///
    /// `Ok(None)` means the service produced no audio; callers suppress the
    /// voice feedback event for that occurrence.
    async fn synthesize(&self, text: &str) -> Result<Option<AudioRef>, ServiceError>;
}

#[derive(Serialize)]
struct SynthesisRequest<'a> {
    text: &'a str,
    voice: &'a str,
}

#[derive(Deserialize)]
struct SynthesisResponse {
    audio_url: Option<String>,
}

/// HTTP speech-synthesis client.
pub struct HttpSynthesizer {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    voice: String,
}

impl HttpSynthesizer {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(15))
                .build()
                .unwrap_or_default(),
            base_url: base_url.into(),
            api_key,
            voice: "warm".to_string(),
        }
    }

    pub fn with_voice(mut self, voice: impl Into<String>) -> Self {
        self.voice = voice.into();
        self
    }
}

#[async_trait::async_trait]
impl SpeechSynthesizer for HttpSynthesizer {
    async fn synthesize(&self, text: &str) -> Result<Option<AudioRef>, ServiceError> {
        let Some(key) = &self.api_key else {
            return Err(ServiceError::Unavailable("speech api key"));
        };

        let response = self
            .client
            .post(format!("{}/v1/speech", self.base_url))
            .bearer_auth(key)
            .json(&SynthesisRequest {
                text,
                voice: &self.voice,
            })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ServiceError::Status(response.status().as_u16()));
        }

        let body: SynthesisResponse = response.json().await?;
        match body.audio_url {
            Some(url) => {
                info!("synthesized {} chars of feedback", text.len());
                Ok(Some(AudioRef::new(url)))
            }
            None => Ok(None),
        }
    }
}
