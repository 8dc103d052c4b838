use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::info;

use super::error::ServiceError;
use crate::audio::AudioRef;

/// Speech-to-text service.
#[async_trait::async_trait]
pub trait Transcriber: Send + Sync {
    /// Transcribe a captured clip.
    ///
    /// `Ok(None)` means the service completed but found no speech; callers
    /// treat transport errors as silence as well.
    async fn transcribe(&self, audio: &AudioRef) -> Result<Option<String>, ServiceError>;
}

#[derive(Serialize)]
struct TranscribeRequest<'a> {
    audio_url: &'a str,
}

#[derive(Deserialize)]
struct TranscribeResponse {
    text: String,
}

/// HTTP transcription client.
pub struct HttpTranscriber {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl HttpTranscriber {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(15))
                .build()
                .unwrap_or_default(),
            base_url: base_url.into(),
            api_key,
        }
    }
}

#[async_trait::async_trait]
impl Transcriber for HttpTranscriber {
    async fn transcribe(&self, audio: &AudioRef) -> Result<Option<String>, ServiceError> {
        let Some(key) = &self.api_key else {
            return Err(ServiceError::Unavailable("transcription api key"));
        };

        let response = self
            .client
            .post(format!("{}/v1/transcripts", self.base_url))
            .bearer_auth(key)
            .json(&TranscribeRequest {
                audio_url: audio.uri(),
            })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ServiceError::Status(response.status().as_u16()));
        }

        let body: TranscribeResponse = response.json().await?;
        let text = body.text.trim().to_string();

        if text.is_empty() {
            return Ok(None);
        }

        info!("transcribed clip {} ({} chars)", audio.uri(), text.len());
        Ok(Some(text))
    }
}
