use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use rand::seq::SliceRandom;
use tracing::{debug, info};

use super::personalize::personalize;
use super::rules::{match_activity, DaySegment};
use super::throttle::should_show_nudge;
use crate::profile::UserProfile;
use crate::services::InsightService;
use crate::session::{CoachingTip, Priority, TipSource, TranscriptEntry};

/// Pick a time-of-day tip for the given hour and personalize it.
pub fn time_based_tip(hour: u32, profile: &UserProfile) -> CoachingTip {
    let segment = DaySegment::from_hour(hour);
    let tips = segment.tips();
    let tip = tips
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(tips[0]);

    CoachingTip {
        message: personalize(tip, profile),
        category: "time_based".to_string(),
        priority: Priority::Medium,
        timestamp: Utc::now(),
        source: TipSource::TimeBased,
    }
}

/// Scan the last three transcript entries for an activity pattern and pick
/// one of its tips.
pub fn activity_tip(transcript: &[TranscriptEntry], profile: &UserProfile) -> Option<CoachingTip> {
    let recent_text = transcript
        .iter()
        .rev()
        .take(3)
        .rev()
        .map(|e| e.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();

    let rule = match_activity(&recent_text)?;
    let tip = rule
        .tips
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(rule.tips[0]);

    debug!("activity pattern matched: {}", rule.name);

    Some(CoachingTip {
        message: personalize(tip, profile),
        category: "activity_based".to_string(),
        priority: Priority::Medium,
        timestamp: Utc::now(),
        source: TipSource::ActivityBased,
    })
}

/// Periodic generator of background coaching tips.
///
/// Each cycle produces up to four candidates (time-based, activity-based,
/// AI-contextual, pattern analysis), each independently gated by the nudge
/// throttle against the shared coaching history.
pub struct BackgroundCoach {
    insights: Arc<dyn InsightService>,
    pattern_gap: Duration,
    pattern_min_entries: usize,
}

impl BackgroundCoach {
    pub fn new(
        insights: Arc<dyn InsightService>,
        pattern_gap_hours: i64,
        pattern_min_entries: usize,
    ) -> Self {
        Self {
            insights,
            pattern_gap: Duration::hours(pattern_gap_hours),
            pattern_min_entries,
        }
    }

    /// Run one coaching cycle. `hour` is the local hour of day.
    pub async fn generate(
        &self,
        transcript: &[TranscriptEntry],
        profile: &UserProfile,
        history: &[CoachingTip],
        hour: u32,
        now: DateTime<Utc>,
    ) -> Vec<CoachingTip> {
        let mut tips = Vec::new();

        let time_tip = time_based_tip(hour, profile);
        if should_show_nudge(&time_tip.category, history, profile, now) {
            tips.push(time_tip);
        }

        if let Some(tip) = activity_tip(transcript, profile) {
            if should_show_nudge(&tip.category, history, profile, now) {
                tips.push(tip);
            }
        }

        if let Some(tip) = self.contextual_tip(transcript, profile).await {
            if should_show_nudge(&tip.category, history, profile, now) {
                tips.push(tip);
            }
        }

        if let Some(tip) = self.pattern_tip(transcript, profile, history, now).await {
            if should_show_nudge(&tip.category, history, profile, now) {
                tips.push(tip);
            }
        }

        if !tips.is_empty() {
            info!("generated {} background coaching tips", tips.len());
        }

        tips
    }

    /// AI tip grounded in the most recent transcript entry.
    async fn contextual_tip(
        &self,
        transcript: &[TranscriptEntry],
        profile: &UserProfile,
    ) -> Option<CoachingTip> {
        let recent = transcript.last()?;

        match self.insights.coaching_tip(&recent.text, profile).await {
            Ok(message) if !message.is_empty() => Some(CoachingTip {
                message,
                category: "ai_generated".to_string(),
                priority: Priority::Medium,
                timestamp: Utc::now(),
                source: TipSource::AiContextual,
            }),
            Ok(_) => None,
            Err(e) => {
                debug!("contextual tip skipped: {e}");
                None
            }
        }
    }

    /// Pattern-analysis tip, at most once per gap and only with enough
    /// transcript to analyze.
    async fn pattern_tip(
        &self,
        transcript: &[TranscriptEntry],
        profile: &UserProfile,
        history: &[CoachingTip],
        now: DateTime<Utc>,
    ) -> Option<CoachingTip> {
        if transcript.len() < self.pattern_min_entries {
            return None;
        }

        let last_analysis = history
            .iter()
            .filter(|t| t.source == TipSource::PatternAnalysis)
            .map(|t| t.timestamp)
            .max();
        if let Some(last) = last_analysis {
            if now - last < self.pattern_gap {
                return None;
            }
        }

        match self.insights.analyze_patterns(transcript, profile).await {
            Ok(insights) => Some(CoachingTip {
                message: insights.encouragement,
                category: "pattern_analysis".to_string(),
                priority: Priority::Low,
                timestamp: Utc::now(),
                source: TipSource::PatternAnalysis,
            }),
            Err(e) => {
                debug!("pattern analysis skipped: {e}");
                None
            }
        }
    }
}
