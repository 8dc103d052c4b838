use super::keywords::{any_match, CONCERN_KEYWORDS, INTENSITY_KEYWORDS};
use crate::services::InsightReport;
use crate::session::TranscriptEntry;

/// Scoring weights for concern detection.
///
/// Heuristic constants carried as configuration; they were never calibrated
/// against ground truth and must not be recomputed.
#[derive(Debug, Clone, Copy)]
pub struct ConcernWeights {
    /// Per distinct concerning keyword in transcript or insight text
    pub keyword: f32,
    /// Per intensity keyword in the transcript
    pub intensity: f32,
    /// When the insight mood sentiment is "negative"
    pub negative_mood: f32,
    /// When two of the previous three entries were already concerning
    pub repetition: f32,
    /// Feedback is recommended at or above this score
    pub threshold: f32,
}

impl Default for ConcernWeights {
    fn default() -> Self {
        Self {
            keyword: 0.3,
            intensity: 0.1,
            negative_mood: 0.4,
            repetition: 0.5,
            threshold: 0.5,
        }
    }
}

/// Scores transcript segments for concerning emotional content.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConcernDetector {
    weights: ConcernWeights,
}

impl ConcernDetector {
    pub fn new(weights: ConcernWeights) -> Self {
        Self { weights }
    }

    pub fn threshold(&self) -> f32 {
        self.weights.threshold
    }

    /// Score one segment against its insight report and the preceding
    /// entries (the current segment must not be in `recent`).
    ///
    /// The sum is deliberately uncapped; only the threshold matters.
    pub fn score(
        &self,
        transcript: &str,
        report: &InsightReport,
        recent: &[TranscriptEntry],
    ) -> f32 {
        let lower_transcript = transcript.to_lowercase();
        let lower_insights = report.insights.to_lowercase();

        let mut level = 0.0;

        for keyword in CONCERN_KEYWORDS {
            if lower_transcript.contains(keyword) || lower_insights.contains(keyword) {
                level += self.weights.keyword;
            }
        }

        for keyword in INTENSITY_KEYWORDS {
            if lower_transcript.contains(keyword) {
                level += self.weights.intensity;
            }
        }

        if report.mood_analysis.sentiment.eq_ignore_ascii_case("negative") {
            level += self.weights.negative_mood;
        }

        let concerning_recent = recent
            .iter()
            .rev()
            .take(3)
            .filter(|e| any_match(&e.text.to_lowercase(), CONCERN_KEYWORDS))
            .count();
        if concerning_recent >= 2 {
            level += self.weights.repetition;
        }

        level
    }

    /// Threshold decision, inclusive at the boundary.
    pub fn is_concerning(
        &self,
        transcript: &str,
        report: &InsightReport,
        recent: &[TranscriptEntry],
    ) -> bool {
        self.score(transcript, report, recent) >= self.weights.threshold
    }
}

/// Ordered issue categories for the empathetic opening clause.
const ISSUE_OPENINGS: &[(&[&str], &str)] = &[
    (&["stressed", "overwhelmed"], "stress and feeling overwhelmed"),
    (&["anxious", "worried"], "anxiety and worry"),
    (&["sad", "lonely"], "feeling sad and lonely"),
    (&["tired", "exhausted"], "feeling tired and exhausted"),
    (
        &["failing", "not good enough"],
        "feeling like you're not good enough",
    ),
];

/// Compose the short spoken feedback for a concerning segment.
pub fn compose_feedback(report: &InsightReport, transcript: &str) -> String {
    let lower = transcript.to_lowercase();

    let main_issue = ISSUE_OPENINGS
        .iter()
        .find(|(terms, _)| terms.iter().any(|t| lower.contains(t)))
        .map(|(_, issue)| *issue)
        .unwrap_or("what you're going through");

    let mut response = format!("I hear you're dealing with {main_issue}. ");

    // First sentence of the insight only; this is spoken aloud.
    if let Some(first) = report.insights.split('.').next() {
        if !first.trim().is_empty() {
            response.push_str(first.trim());
            response.push_str(". ");
        }
    }

    if let Some(tip) = report
        .recommendations
        .first()
        .or_else(|| report.action_items.first())
    {
        response.push_str(tip);
        response.push(' ');
    }

    if report.mood_analysis.sentiment.eq_ignore_ascii_case("negative") {
        response.push_str("Remember, it's okay to not be okay sometimes. ");
    }

    response.push_str("You're doing better than you think.");
    response
}
