//! Per-category nudge frequency policy.
//!
//! Caps are daily limits per nudge category, adjusted for the user's stated
//! challenges and damped globally when the recent volume is high. Categories
//! missing from the table are never throttled.

use chrono::{DateTime, Duration, Utc};

use crate::profile::UserProfile;
use crate::session::CoachingTip;

/// Base daily caps per category.
pub const BASE_CAPS: &[(&str, u32)] = &[
    ("focus", 3),
    ("stress", 2),
    ("energy", 2),
    ("confidence", 1),
    ("relationships", 1),
    ("ai_generated", 2),
    ("time_based", 4),
    ("activity_based", 2),
    ("pattern_analysis", 1),
];

/// Lookback window for counting shown nudges.
pub fn lookback() -> Duration {
    Duration::hours(24)
}

/// Daily cap for a category after profile and volume adjustments.
///
/// Returns `None` for categories absent from the base table (always
/// allowed). `recent_in_window` is the total nudge count inside the
/// lookback window regardless of category.
pub fn adjusted_cap(category: &str, profile: &UserProfile, recent_in_window: usize) -> Option<u32> {
    let base = BASE_CAPS
        .iter()
        .find(|(c, _)| *c == category)
        .map(|(_, cap)| *cap)?;

    let mut cap = base;
    if category == "focus" && profile.has_challenge("distraction") {
        cap += 1;
    }
    if category == "stress" && profile.has_challenge("anxiety") {
        cap += 1;
    }

    // High recent volume dampens everything, but never below one per day.
    if recent_in_window > 8 {
        cap = cap.saturating_sub(1).max(1);
    }

    Some(cap)
}

/// Decide whether a candidate nudge of the given category may be surfaced,
/// given the recently shown nudges.
pub fn should_show_nudge(
    category: &str,
    recent: &[CoachingTip],
    profile: &UserProfile,
    now: DateTime<Utc>,
) -> bool {
    let window_start = now - lookback();
    let in_window: Vec<&CoachingTip> = recent
        .iter()
        .filter(|n| n.timestamp > window_start)
        .collect();

    let Some(cap) = adjusted_cap(category, profile, in_window.len()) else {
        return true;
    };

    let shown = in_window.iter().filter(|n| n.category == category).count();
    (shown as u32) < cap
}
