use anyhow::Result;
use serde::Deserialize;

use crate::session::SessionConfig;

#[derive(Debug, Deserialize)]
pub struct Config {
    pub service: ServiceConfig,
    pub recording: RecordingConfig,
    pub providers: ProvidersConfig,
}

#[derive(Debug, Deserialize)]
pub struct ServiceConfig {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct RecordingConfig {
    pub segment_secs: u64,
    pub coaching_interval_mins: u64,
    pub voice_feedback_cooldown_secs: u64,
}

/// Endpoints and credentials for the three external services.
#[derive(Debug, Deserialize)]
pub struct ProvidersConfig {
    pub stt_url: String,
    pub generative_url: String,
    pub tts_url: String,
    /// Shared API key; absent means demo mode
    pub api_key: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            service: ServiceConfig {
                name: "attune".to_string(),
            },
            recording: RecordingConfig {
                segment_secs: 10,
                coaching_interval_mins: 30,
                voice_feedback_cooldown_secs: 30,
            },
            providers: ProvidersConfig {
                stt_url: "https://stt.example.com".to_string(),
                generative_url: "https://generate.example.com".to_string(),
                tts_url: "https://tts.example.com".to_string(),
                api_key: None,
            },
        }
    }
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path))
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Session tunables derived from the recording section.
    pub fn session(&self) -> SessionConfig {
        SessionConfig {
            segment_duration: std::time::Duration::from_secs(self.recording.segment_secs),
            coaching_interval: std::time::Duration::from_secs(
                self.recording.coaching_interval_mins * 60,
            ),
            voice_feedback_cooldown: std::time::Duration::from_secs(
                self.recording.voice_feedback_cooldown_secs,
            ),
            ..SessionConfig::default()
        }
    }
}
