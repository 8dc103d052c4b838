// Tests for service degradation when no API key is configured: insight
// requests fall back to the demo payload, tip and pattern requests report
// the service as unavailable.

use attune::services::{GenerativeClient, InsightService, ServiceError};
use attune::UserProfile;

fn unconfigured() -> GenerativeClient {
    GenerativeClient::new("http://localhost:9", None)
}

#[tokio::test]
async fn insights_degrade_to_the_demo_payload() {
    let report = unconfigured().generate_insights("a quiet afternoon").await;

    assert_eq!(report.mood_analysis.sentiment, "reflective");
    assert_eq!(report.themes.len(), 1);
    assert_eq!(report.themes[0].name, "Self-awareness");
    assert!(!report.recommendations.is_empty());
}

#[tokio::test]
async fn demo_payload_reflects_the_transcript() {
    let client = unconfigured();

    let work = client.generate_insights("my project is behind").await;
    assert!(work.themes.iter().any(|t| t.name == "Professional growth"));

    let tired = client.generate_insights("I'm exhausted tonight").await;
    assert_eq!(tired.mood_analysis.sentiment, "tired");

    let stressed = client.generate_insights("I am stressed about work").await;
    assert_eq!(stressed.mood_analysis.sentiment, "stressed");
    // Both the work and stress branches applied.
    assert!(stressed.themes.iter().any(|t| t.name == "Professional growth"));
}

#[tokio::test]
async fn tips_and_patterns_require_a_key() {
    let client = unconfigured();
    let profile = UserProfile::default();

    let tip = client.coaching_tip("hello", &profile).await;
    assert!(matches!(tip, Err(ServiceError::Unavailable(_))));

    let patterns = client.analyze_patterns(&[], &profile).await;
    assert!(matches!(patterns, Err(ServiceError::Unavailable(_))));
}

#[test]
fn pattern_fallback_is_stable() {
    let fallback = attune::services::PatternInsights::fallback();
    assert_eq!(fallback.mood_trend, "stable");
    assert!(fallback.encouragement.contains("personal development"));
}
