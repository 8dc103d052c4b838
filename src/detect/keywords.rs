//! Fixed keyword tables for the detection heuristics.
//!
//! These lists are tuned-by-eye constants, not learned values; matching is
//! plain lowercase substring containment.

/// Terms indicating concerning emotional content (stress, self-harm, sadness).
pub const CONCERN_KEYWORDS: &[&str] = &[
    "stressed",
    "anxious",
    "overwhelmed",
    "depressed",
    "hopeless",
    "suicidal",
    "self-harm",
    "worthless",
    "failure",
    "hate myself",
    "can't take it",
    "want to give up",
    "no point",
    "tired of life",
    "struggling",
    "difficult",
    "hard time",
    "crying",
    "sad",
    "lonely",
];

/// Emotional-intensity amplifiers, shared by concern and moment scoring.
pub const INTENSITY_KEYWORDS: &[&str] = &[
    "really",
    "very",
    "extremely",
    "so much",
    "incredibly",
    "absolutely",
    "completely",
    "totally",
    "deeply",
    "profoundly",
];

/// Terms indicating a narratively significant utterance.
pub const SIGNIFICANT_KEYWORDS: &[&str] = &[
    "breakthrough",
    "realization",
    "insight",
    "clarity",
    "understanding",
    "struggle",
    "challenge",
    "overwhelmed",
    "anxious",
    "stressed",
    "proud",
    "accomplished",
    "grateful",
    "excited",
    "motivated",
    "tired",
    "exhausted",
    "frustrated",
    "confused",
    "lost",
];

/// First-person insight phrases worth an extra significance bump.
pub const INSIGHT_PHRASES: &[&str] = &["i realized", "i understand", "i learned"];

/// Moment-type category membership, in assignment priority order.
pub const INSIGHT_CATEGORY: &[&str] = &["breakthrough", "realization", "insight", "clarity"];
pub const CHALLENGE_CATEGORY: &[&str] =
    &["struggle", "challenge", "overwhelmed", "anxious", "stressed"];
pub const ACHIEVEMENT_CATEGORY: &[&str] =
    &["proud", "accomplished", "grateful", "excited", "motivated"];
pub const STRUGGLE_CATEGORY: &[&str] = &["tired", "exhausted", "frustrated", "confused", "lost"];

/// Count how many table entries appear in the (already lowercased) text.
pub fn count_matches(lower_text: &str, table: &[&str]) -> usize {
    table.iter().filter(|k| lower_text.contains(*k)).count()
}

/// True if at least one table entry appears in the (already lowercased) text.
pub fn any_match(lower_text: &str, table: &[&str]) -> bool {
    table.iter().any(|k| lower_text.contains(*k))
}
