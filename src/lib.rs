pub mod audio;
pub mod coaching;
pub mod config;
pub mod detect;
pub mod profile;
pub mod services;
pub mod session;

pub use audio::{AudioRef, CaptureDevice, SimulatedMicrophone};
pub use config::Config;
pub use detect::{ConcernDetector, ConcernWeights, MomentDetector};
pub use profile::{UserProfile, VoiceTone};
pub use services::{
    CoachServices, GenerativeClient, HttpSynthesizer, HttpTranscriber, InsightReport,
    InsightService, PatternInsights, ServiceError, SpeechSynthesizer, Transcriber,
};
pub use session::{
    CoachEvent, CoachingTip, Moment, MomentKind, Nudge, Priority, RecordingOrchestrator,
    SessionConfig, SessionStats, TipSource, TranscriptEntry, VoiceFeedbackEvent,
};
