use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use super::keywords::{
    ACHIEVEMENT_CATEGORY, CHALLENGE_CATEGORY, INSIGHT_CATEGORY, INSIGHT_PHRASES,
    INTENSITY_KEYWORDS, SIGNIFICANT_KEYWORDS, STRUGGLE_CATEGORY,
};
use crate::audio::AudioRef;
use crate::session::{Moment, MomentKind};

/// Raw significance score for a transcript segment.
#[derive(Debug, Clone)]
pub struct SignificanceScore {
    /// Uncapped accumulated score
    pub value: f32,
    /// Significant keywords that matched, in table order
    pub keywords: Vec<String>,
}

/// Scores transcript segments for narrative significance and emits typed
/// moments above the threshold.
#[derive(Debug, Clone, Copy)]
pub struct MomentDetector {
    threshold: f32,
}

impl Default for MomentDetector {
    fn default() -> Self {
        Self { threshold: 0.7 }
    }
}

impl MomentDetector {
    pub fn new(threshold: f32) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Keyword-scoring heuristic: +0.3 per significant keyword, +0.2 per
    /// intensity keyword, +0.4 for a first-person insight phrase.
    pub fn score(&self, transcript: &str) -> SignificanceScore {
        let lower = transcript.to_lowercase();

        let mut value = 0.0;
        let mut keywords = Vec::new();

        for keyword in SIGNIFICANT_KEYWORDS {
            if lower.contains(keyword) {
                value += 0.3;
                keywords.push((*keyword).to_string());
            }
        }

        for keyword in INTENSITY_KEYWORDS {
            if lower.contains(keyword) {
                value += 0.2;
            }
        }

        if INSIGHT_PHRASES.iter().any(|p| lower.contains(p)) {
            value += 0.4;
        }

        SignificanceScore { value, keywords }
    }

    /// Create a moment if the segment scores at or above the threshold.
    pub fn detect(&self, transcript: &str, audio: Option<AudioRef>) -> Option<Moment> {
        let score = self.score(transcript);
        if score.value < self.threshold {
            return None;
        }

        let moment = Moment {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            transcript: transcript.to_string(),
            significance: score.value.min(1.0),
            kind: Self::categorize(&score.keywords),
            keywords: score.keywords,
            audio,
        };

        info!(
            "significant moment detected ({:?}, significance {:.2})",
            moment.kind, moment.significance
        );

        Some(moment)
    }

    /// Fixed priority order over keyword-category membership.
    pub fn categorize(keywords: &[String]) -> MomentKind {
        let has = |category: &[&str]| keywords.iter().any(|k| category.contains(&k.as_str()));

        if has(INSIGHT_CATEGORY) {
            MomentKind::Insight
        } else if has(CHALLENGE_CATEGORY) {
            MomentKind::Challenge
        } else if has(ACHIEVEMENT_CATEGORY) {
            MomentKind::Achievement
        } else if has(STRUGGLE_CATEGORY) {
            MomentKind::Struggle
        } else {
            MomentKind::Reflection
        }
    }
}
