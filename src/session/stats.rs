use serde::{Deserialize, Serialize};

/// Point-in-time snapshot of a recording session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionStats {
    /// Whether the session is running
    pub is_recording: bool,

    /// Whether segment rotation is suppressed for audio playback
    pub is_paused: bool,

    /// Number of transcript entries accumulated
    pub transcript_count: usize,

    /// Number of significant moments detected
    pub moment_count: usize,

    /// Number of coaching tips generated
    pub coaching_count: usize,

    /// Whether a capture segment is currently open
    pub segment_active: bool,
}
