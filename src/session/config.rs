use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::detect::ConcernWeights;

/// Tunables for a recording session.
///
/// The scoring thresholds are heuristic constants preserved as
/// configuration; changing them changes behavior, not correctness.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Unique session identifier
    pub session_id: String,

    /// Fixed duration of each capture segment before rotation
    /// Default: 10 seconds
    pub segment_duration: Duration,

    /// Period of the background coaching timer (first run is immediate)
    /// Default: 30 minutes
    pub coaching_interval: Duration,

    /// Minimum wall-clock gap between voice feedback emissions
    /// Default: 30 seconds
    pub voice_feedback_cooldown: Duration,

    /// Significance threshold for moment creation (default 0.7)
    pub moment_threshold: f32,

    /// Concern threshold for voice feedback (default 0.5, inclusive)
    pub concern_threshold: f32,

    /// Minimum hours between pattern-analysis tips (default 4)
    pub pattern_gap_hours: i64,

    /// Minimum transcript entries before pattern analysis runs (default 5)
    pub pattern_min_entries: usize,

    /// Outbound event channel capacity
    pub event_buffer: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            session_id: format!("session-{}", uuid::Uuid::new_v4()),
            segment_duration: Duration::from_secs(10),
            coaching_interval: Duration::from_secs(30 * 60),
            voice_feedback_cooldown: Duration::from_secs(30),
            moment_threshold: 0.7,
            concern_threshold: 0.5,
            pattern_gap_hours: 4,
            pattern_min_entries: 5,
            event_buffer: 64,
        }
    }
}

impl SessionConfig {
    /// Concern weights with the configured threshold applied.
    pub fn concern_weights(&self) -> ConcernWeights {
        ConcernWeights {
            threshold: self.concern_threshold,
            ..ConcernWeights::default()
        }
    }
}
