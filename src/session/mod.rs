//! Recording session management
//!
//! This module provides the `RecordingOrchestrator` that owns:
//! - the record/pause/resume/stop lifecycle and segment rotation
//! - the per-segment processing pipeline (transcription, concern analysis,
//!   nudges, activity coaching, moment detection)
//! - the background coaching timer
//! - transcript/moment/coaching buffers and the outbound event channel

mod config;
mod events;
mod orchestrator;
mod stats;

pub use config::SessionConfig;
pub use events::{
    CoachEvent, CoachingTip, Moment, MomentKind, Nudge, Priority, TipSource, TranscriptEntry,
    VoiceFeedbackEvent,
};
pub use orchestrator::RecordingOrchestrator;
pub use stats::SessionStats;
