// Tests for significant-moment scoring and classification.
//
// Scoring: +0.3 per significant keyword, +0.2 per intensity keyword, +0.4
// for a first-person insight phrase. Threshold 0.7; stored significance is
// clamped to 1.0.

use attune::{AudioRef, Moment, MomentDetector, MomentKind};

fn detect(text: &str) -> Option<Moment> {
    MomentDetector::default().detect(text, Some(AudioRef::new("sim://clip-1")))
}

#[test]
fn single_keyword_is_not_significant() {
    assert!(detect("i am tired").is_none());
}

#[test]
fn insight_phrase_with_keywords_is_a_challenge() {
    let moment = detect("i realized i struggle with deadlines and i am exhausted")
        .expect("should be significant");

    assert_eq!(moment.kind, MomentKind::Challenge);
    assert!(moment.significance >= 0.7);
    assert!(moment.significance <= 1.0);
    assert_eq!(moment.keywords, vec!["struggle", "exhausted"]);
    assert!(moment.audio.is_some());
}

#[test]
fn significance_is_clamped() {
    // Three significant and three intensity keywords: raw score well over 1.
    let moment = detect("I'm really proud and deeply grateful, totally accomplished")
        .expect("should be significant");

    assert_eq!(moment.kind, MomentKind::Achievement);
    assert!((moment.significance - 1.0).abs() < 1e-4);
}

#[test]
fn insight_outranks_challenge() {
    let moment = detect("i realized it was a breakthrough in my struggle")
        .expect("should be significant");

    assert_eq!(moment.kind, MomentKind::Insight);
}

#[test]
fn phrase_only_moments_are_reflections() {
    // No significant keywords at all, only the phrase and intensity words.
    let moment = detect("i realized something really very profoundly important")
        .expect("should be significant");

    assert_eq!(moment.kind, MomentKind::Reflection);
    assert!(moment.keywords.is_empty());
}

#[test]
fn categorize_priority_order() {
    let kind = |words: &[&str]| {
        MomentDetector::categorize(&words.iter().map(|w| w.to_string()).collect::<Vec<_>>())
    };

    assert_eq!(kind(&["struggle"]), MomentKind::Challenge);
    assert_eq!(kind(&["proud"]), MomentKind::Achievement);
    assert_eq!(kind(&["tired"]), MomentKind::Struggle);
    assert_eq!(kind(&["clarity", "struggle", "proud"]), MomentKind::Insight);
    assert_eq!(kind(&[]), MomentKind::Reflection);
}

#[test]
fn score_reports_matched_keywords_in_table_order() {
    let score = MomentDetector::default().score("so grateful for this breakthrough");
    assert_eq!(score.keywords, vec!["breakthrough", "grateful"]);
}
