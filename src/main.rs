use std::sync::Arc;

use anyhow::Result;
use attune::{
    CoachEvent, CoachServices, Config, GenerativeClient, HttpSynthesizer, HttpTranscriber,
    RecordingOrchestrator, SimulatedMicrophone, UserProfile,
};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cfg = match Config::load("config/attune") {
        Ok(cfg) => cfg,
        Err(e) => {
            warn!("no config file found ({e}), using defaults");
            Config::default()
        }
    };

    info!("{} v0.1.0", cfg.service.name);
    if cfg.providers.api_key.is_none() {
        info!("no API key configured; insight service runs in demo mode");
    }

    let services = CoachServices {
        transcriber: Arc::new(HttpTranscriber::new(
            &cfg.providers.stt_url,
            cfg.providers.api_key.clone(),
        )),
        insights: Arc::new(GenerativeClient::new(
            &cfg.providers.generative_url,
            cfg.providers.api_key.clone(),
        )),
        speech: Arc::new(HttpSynthesizer::new(
            &cfg.providers.tts_url,
            cfg.providers.api_key.clone(),
        )),
    };

    let orchestrator = RecordingOrchestrator::new(
        cfg.session(),
        services,
        Box::new(SimulatedMicrophone::new()),
    );

    let mut events = orchestrator.initialize(UserProfile::default()).await?;
    orchestrator.start().await?;

    let event_logger = tokio::spawn(async move {
        while let Some(event) = events.recv().await {
            match event {
                CoachEvent::TranscriptUpdated(entries) => {
                    info!("transcript updated ({} entries)", entries.len())
                }
                CoachEvent::MomentDetected(moment) => {
                    info!("moment detected: {:?} ({:.2})", moment.kind, moment.significance)
                }
                CoachEvent::NudgeTriggered(nudge) => {
                    info!("nudge [{}]: {}", nudge.category, nudge.message)
                }
                CoachEvent::CoachingGenerated(tip) => {
                    info!("coaching tip [{:?}]: {}", tip.source, tip.message)
                }
                CoachEvent::VoiceFeedback(feedback) => {
                    info!("voice feedback: {}", feedback.text)
                }
            }
        }
    });

    info!("recording... press Ctrl-C to stop");
    tokio::signal::ctrl_c().await?;

    let stats = orchestrator.stop().await;
    info!(
        "session complete: {} transcript entries, {} moments, {} coaching tips",
        stats.transcript_count, stats.moment_count, stats.coaching_count
    );

    event_logger.abort();
    Ok(())
}
