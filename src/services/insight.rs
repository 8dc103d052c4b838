use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::error::ServiceError;
use crate::profile::{UserProfile, VoiceTone};
use crate::session::TranscriptEntry;

/// A named theme surfaced by the insight service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    pub description: String,
}

/// Mood assessment attached to an insight report.
///
/// Sentiment is a free-form lowercase label; the concern detector only
/// reacts to the literal value "negative".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoodAnalysis {
    pub sentiment: String,
    pub description: String,
}

/// Structured analysis of one transcript segment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightReport {
    pub insights: String,
    pub themes: Vec<Theme>,
    pub recommendations: Vec<String>,
    pub mood_analysis: MoodAnalysis,
    pub action_items: Vec<String>,
}

/// Longer-horizon pattern analysis over the whole transcript buffer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternInsights {
    pub patterns: Vec<String>,
    pub mood_trend: String,
    pub key_themes: Vec<String>,
    pub suggested_focus: String,
    pub encouragement: String,
}

impl PatternInsights {
    /// Fixed structure substituted when the service response cannot be parsed.
    pub fn fallback() -> Self {
        Self {
            patterns: vec!["Daily reflection".to_string()],
            mood_trend: "stable".to_string(),
            key_themes: vec!["Personal growth".to_string()],
            suggested_focus: "Continue your reflection practice".to_string(),
            encouragement: "You're doing great work on your personal development journey!"
                .to_string(),
        }
    }
}

/// Generative-text service.
#[async_trait::async_trait]
pub trait InsightService: Send + Sync {
    /// Analyze one transcript segment.
    ///
    /// Infallible by contract: implementations degrade to a fixed demo
    /// payload when the service is unavailable or misconfigured.
    async fn generate_insights(&self, transcript: &str) -> InsightReport;

    /// Generate a short (max two sentences) contextual coaching tip.
    async fn coaching_tip(
        &self,
        transcript: &str,
        profile: &UserProfile,
    ) -> Result<String, ServiceError>;

    /// Analyze the full transcript buffer for patterns.
    ///
    /// A malformed response is replaced by [`PatternInsights::fallback`];
    /// only transport failures surface as errors.
    async fn analyze_patterns(
        &self,
        transcript: &[TranscriptEntry],
        profile: &UserProfile,
    ) -> Result<PatternInsights, ServiceError>;
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    prompt: &'a str,
    stream: bool,
    n_predict: usize,
    temperature: f32,
}

#[derive(Deserialize)]
struct CompletionResponse {
    content: String,
}

/// HTTP client for the generative-text service.
///
/// Without an API key every call runs in demo mode: insight requests return
/// a canned report lightly personalized from the transcript, tip and pattern
/// requests report the service as unavailable.
pub struct GenerativeClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl GenerativeClient {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(20))
                .build()
                .unwrap_or_default(),
            base_url: base_url.into(),
            api_key,
        }
    }

    async fn complete(&self, prompt: &str, n_predict: usize) -> Result<String, ServiceError> {
        let Some(key) = &self.api_key else {
            return Err(ServiceError::Unavailable("generative api key"));
        };

        let request = CompletionRequest {
            prompt,
            stream: false,
            n_predict,
            temperature: 0.4,
        };

        let response = self
            .client
            .post(format!("{}/v1/completion", self.base_url))
            .bearer_auth(key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ServiceError::Status(response.status().as_u16()));
        }

        let body: CompletionResponse = response.json().await?;
        Ok(body.content.trim().to_string())
    }

    /// Canned insight report, nudged toward the transcript's content the way
    /// the service's own demo mode behaves.
    pub fn demo_report(transcript: &str) -> InsightReport {
        let lower = transcript.to_lowercase();

        let mut report = InsightReport {
            insights: "You're showing great self-awareness in recognizing your feelings."
                .to_string(),
            themes: vec![Theme {
                name: "Self-awareness".to_string(),
                description: "You're developing deeper understanding of yourself".to_string(),
            }],
            recommendations: vec![
                "Take a few deep breaths to help you feel more centered".to_string()
            ],
            mood_analysis: MoodAnalysis {
                sentiment: "reflective".to_string(),
                description: "You're showing mindfulness in your reflections".to_string(),
            },
            action_items: vec!["Try taking a short break to refresh your mind".to_string()],
        };

        if lower.contains("work") || lower.contains("project") {
            report.themes.push(Theme {
                name: "Professional growth".to_string(),
                description: "You're balancing work and personal development".to_string(),
            });
            report
                .recommendations
                .push("Set clear boundaries between work and personal time".to_string());
        }

        if lower.contains("tired") || lower.contains("exhausted") {
            report.mood_analysis.sentiment = "tired".to_string();
            report.mood_analysis.description =
                "You're recognizing your energy levels and taking care of yourself".to_string();
            report
                .action_items
                .push("Prioritize rest and self-care today".to_string());
        }

        if lower.contains("stressed") || lower.contains("anxious") {
            report.mood_analysis.sentiment = "stressed".to_string();
            report.mood_analysis.description =
                "You're aware of your stress and seeking balance".to_string();
            report
                .recommendations
                .push("Practice deep breathing when you feel overwhelmed".to_string());
        }

        report
    }
}

fn insight_prompt(transcript: &str) -> String {
    format!(
        "You are an empathetic AI mental wellness coach. Analyze the following reflection \
         transcript and provide a short, focused insight and tip. Keep your response SHORT; \
         it will be read aloud as voice feedback.\n\nTranscript: \"{transcript}\"\n\n\
         Respond in JSON with fields: insights (string), themes (array of {{name, description}}), \
         recommendations (array of strings), moodAnalysis {{sentiment: positive/negative/neutral, \
         description}}, actionItems (array of strings)."
    )
}

fn tip_prompt(transcript: &str, profile: &UserProfile) -> String {
    let name = profile.name.as_deref().unwrap_or("the user");
    let goals = join_or(&profile.goals, "personal growth");
    let challenges = join_or(&profile.challenges, "general challenges");
    let tone = tone_label(profile.voice_tone);

    format!(
        "You are a supportive AI coach for {name}.\nTheir goals: {goals}\nTheir challenges: \
         {challenges}\nThey prefer a {tone} tone.\n\nBased on this recent transcript entry: \
         \"{transcript}\"\n\nGenerate a brief, actionable coaching tip (max 2 sentences) that \
         acknowledges their situation, provides a specific doable action, uses their preferred \
         tone, and relates to their goals. Respond with just the coaching tip."
    )
}

fn pattern_prompt(transcript: &[TranscriptEntry], profile: &UserProfile) -> String {
    let lines: Vec<String> = transcript
        .iter()
        .map(|e| format!("{}: {}", e.timestamp.to_rfc3339(), e.text))
        .collect();

    format!(
        "Analyze this daily transcript for patterns and insights:\n\n{}\n\nUser profile:\n- \
         Goals: {}\n- Challenges: {}\n- Preferred tone: {}\n\nProvide insights in JSON: \
         {{\"patterns\": [..], \"mood_trend\": \"improving/stable/declining\", \"key_themes\": \
         [..], \"suggested_focus\": \"..\", \"encouragement\": \"..\"}}",
        lines.join("\n"),
        join_or(&profile.goals, "personal growth"),
        join_or(&profile.challenges, "general challenges"),
        tone_label(profile.voice_tone),
    )
}

fn join_or(items: &[String], fallback: &str) -> String {
    if items.is_empty() {
        fallback.to_string()
    } else {
        items.join(", ")
    }
}

fn tone_label(tone: VoiceTone) -> &'static str {
    match tone {
        VoiceTone::Calm => "calm",
        VoiceTone::Cheerful => "cheerful",
        VoiceTone::Direct => "direct",
    }
}

/// Strip markdown code fences the model sometimes wraps JSON in.
fn strip_fences(text: &str) -> &str {
    let trimmed = text.trim();
    trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|s| s.strip_suffix("```"))
        .map(str::trim)
        .unwrap_or(trimmed)
}

#[async_trait::async_trait]
impl InsightService for GenerativeClient {
    async fn generate_insights(&self, transcript: &str) -> InsightReport {
        match self.complete(&insight_prompt(transcript), 256).await {
            Ok(content) => match serde_json::from_str::<InsightReport>(strip_fences(&content)) {
                Ok(report) => report,
                Err(e) => {
                    warn!("unparseable insight response, using demo payload: {e}");
                    Self::demo_report(transcript)
                }
            },
            Err(ServiceError::Unavailable(_)) => {
                info!("insight service not configured, using demo payload");
                Self::demo_report(transcript)
            }
            Err(e) => {
                warn!("insight request failed, using demo payload: {e}");
                Self::demo_report(transcript)
            }
        }
    }

    async fn coaching_tip(
        &self,
        transcript: &str,
        profile: &UserProfile,
    ) -> Result<String, ServiceError> {
        self.complete(&tip_prompt(transcript, profile), 96).await
    }

    async fn analyze_patterns(
        &self,
        transcript: &[TranscriptEntry],
        profile: &UserProfile,
    ) -> Result<PatternInsights, ServiceError> {
        let content = self
            .complete(&pattern_prompt(transcript, profile), 256)
            .await?;

        match serde_json::from_str::<PatternInsights>(strip_fences(&content)) {
            Ok(insights) => Ok(insights),
            Err(e) => {
                warn!("unparseable pattern analysis, using fallback: {e}");
                Ok(PatternInsights::fallback())
            }
        }
    }
}
