use serde::{Deserialize, Serialize};

/// Preferred tone for coaching messages and synthesized voice feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoiceTone {
    #[default]
    Calm,
    Cheerful,
    Direct,
}

/// User profile driving personalization and nudge frequency adjustments.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserProfile {
    /// Display name, prefixed onto coaching messages when present
    pub name: Option<String>,

    /// Stated goals (e.g. "Deep focus", "Better sleep")
    pub goals: Vec<String>,

    /// Stated challenges (e.g. "Distraction & Procrastination")
    pub challenges: Vec<String>,

    /// Preferred coaching tone
    pub voice_tone: VoiceTone,
}

impl UserProfile {
    /// True if any stated challenge mentions the given term (case-insensitive).
    pub fn has_challenge(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.challenges
            .iter()
            .any(|c| c.to_lowercase().contains(&term))
    }
}
