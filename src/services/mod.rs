//! External service contracts
//!
//! The engine consumes three SaaS services as black boxes:
//! - speech-to-text transcription of captured clips
//! - generative-text insight/coaching analysis
//! - text-to-speech synthesis for voice feedback
//!
//! Concrete wire protocols are an implementation detail of the HTTP clients;
//! the orchestrator only sees the traits.

mod error;
mod insight;
mod speech;
mod transcribe;

use std::sync::Arc;

pub use error::ServiceError;
pub use insight::{
    GenerativeClient, InsightReport, InsightService, MoodAnalysis, PatternInsights, Theme,
};
pub use speech::{HttpSynthesizer, SpeechSynthesizer};
pub use transcribe::{HttpTranscriber, Transcriber};

/// Bundle of the three service handles the orchestrator depends on.
#[derive(Clone)]
pub struct CoachServices {
    pub transcriber: Arc<dyn Transcriber>,
    pub insights: Arc<dyn InsightService>,
    pub speech: Arc<dyn SpeechSynthesizer>,
}
