use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::audio::AudioRef;

/// One transcribed recording segment. The ordered sequence of entries is the
/// session's memory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptEntry {
    pub timestamp: DateTime<Utc>,
    pub text: String,
    pub audio: AudioRef,
    pub duration_secs: f64,
}

/// Classification of a significant moment, in detection priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MomentKind {
    Insight,
    Challenge,
    Achievement,
    Struggle,
    Reflection,
}

/// An emotionally or narratively significant transcript segment, retained
/// for later review. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Moment {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub transcript: String,
    /// Clamped to 1.0
    pub significance: f32,
    pub keywords: Vec<String>,
    pub kind: MomentKind,
    pub audio: Option<AudioRef>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

/// Where a coaching tip originated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TipSource {
    TimeBased,
    ActivityBased,
    AiContextual,
    PatternAnalysis,
    RealTimeFeedback,
}

/// A short reactive coaching message triggered by a keyword match in a
/// transcript segment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Nudge {
    /// The phrase that fired
    pub trigger: String,
    pub message: String,
    pub category: String,
    pub priority: Priority,
    pub timestamp: DateTime<Utc>,
}

/// A proactively scheduled coaching message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoachingTip {
    pub message: String,
    pub category: String,
    pub priority: Priority,
    pub timestamp: DateTime<Utc>,
    pub source: TipSource,
}

/// Synthesized spoken feedback for a concerning segment. Emitted at most
/// once per cooldown window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoiceFeedbackEvent {
    pub text: String,
    pub audio: AudioRef,
    pub timestamp: DateTime<Utc>,
    pub source: TipSource,
}

/// Events delivered to the presentation layer.
///
/// Sent over a bounded channel from within pipeline steps; consumers must
/// not block on handling them.
#[derive(Debug, Clone)]
pub enum CoachEvent {
    /// Full transcript snapshot after a new entry was appended
    TranscriptUpdated(Vec<TranscriptEntry>),
    MomentDetected(Moment),
    NudgeTriggered(Nudge),
    CoachingGenerated(CoachingTip),
    VoiceFeedback(VoiceFeedbackEvent),
}
