// Integration tests for the recording orchestrator: lifecycle, segment
// rotation, the processing pipeline, pause semantics, and voice feedback.
//
// The capture device and all three services are in-process mocks; segment
// durations are shrunk to tens of milliseconds so rotations happen quickly.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{bail, Result};
use attune::services::{
    CoachServices, InsightReport, InsightService, MoodAnalysis, PatternInsights, ServiceError,
    SpeechSynthesizer, Transcriber,
};
use attune::{
    AudioRef, CaptureDevice, CoachEvent, RecordingOrchestrator, SessionConfig,
    SimulatedMicrophone, TranscriptEntry, UserProfile, VoiceTone,
};
use tokio::sync::mpsc;
use tokio::time::{sleep, timeout};

/// Counters observed from outside the orchestrator.
#[derive(Default)]
struct MicProbe {
    opens: AtomicUsize,
    double_open: AtomicBool,
}

/// Capture device that records how it was driven.
struct ScriptedMic {
    probe: Arc<MicProbe>,
    capturing: bool,
    counter: usize,
}

impl ScriptedMic {
    fn new(probe: Arc<MicProbe>) -> Self {
        Self {
            probe,
            capturing: false,
            counter: 0,
        }
    }
}

#[async_trait::async_trait]
impl CaptureDevice for ScriptedMic {
    async fn ensure_access(&mut self) -> Result<()> {
        Ok(())
    }

    async fn start_segment(&mut self) -> Result<()> {
        if self.capturing {
            self.probe.double_open.store(true, Ordering::SeqCst);
            bail!("segment already open");
        }
        self.capturing = true;
        self.probe.opens.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn stop_segment(&mut self) -> Result<Option<AudioRef>> {
        if !self.capturing {
            return Ok(None);
        }
        self.capturing = false;
        let clip = AudioRef::new(format!("mock://clip-{}", self.counter));
        self.counter += 1;
        Ok(Some(clip))
    }

    fn is_capturing(&self) -> bool {
        self.capturing
    }

    fn name(&self) -> &str {
        "scripted-mic"
    }
}

/// Transcriber that pops scripted texts; an exhausted script means silence.
struct ScriptedTranscriber {
    script: Mutex<VecDeque<String>>,
}

impl ScriptedTranscriber {
    fn new(lines: &[&str]) -> Self {
        Self {
            script: Mutex::new(lines.iter().map(|s| s.to_string()).collect()),
        }
    }
}

#[async_trait::async_trait]
impl Transcriber for ScriptedTranscriber {
    async fn transcribe(&self, _audio: &AudioRef) -> Result<Option<String>, ServiceError> {
        Ok(self.script.lock().unwrap().pop_front())
    }
}

/// Insight service with a fixed neutral report and no tip generation.
struct NeutralInsight;

#[async_trait::async_trait]
impl InsightService for NeutralInsight {
    async fn generate_insights(&self, _transcript: &str) -> InsightReport {
        InsightReport {
            insights: "A calm reflection.".to_string(),
            themes: vec![],
            recommendations: vec!["Take a short walk.".to_string()],
            mood_analysis: MoodAnalysis {
                sentiment: "neutral".to_string(),
                description: "steady".to_string(),
            },
            action_items: vec![],
        }
    }

    async fn coaching_tip(
        &self,
        _transcript: &str,
        _profile: &UserProfile,
    ) -> Result<String, ServiceError> {
        Err(ServiceError::Unavailable("insight service"))
    }

    async fn analyze_patterns(
        &self,
        _transcript: &[TranscriptEntry],
        _profile: &UserProfile,
    ) -> Result<PatternInsights, ServiceError> {
        Err(ServiceError::Unavailable("insight service"))
    }
}

/// Synthesizer that counts calls and always produces audio.
#[derive(Default)]
struct CountingSynth {
    calls: Arc<AtomicUsize>,
}

#[async_trait::async_trait]
impl SpeechSynthesizer for CountingSynth {
    async fn synthesize(&self, _text: &str) -> Result<Option<AudioRef>, ServiceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(Some(AudioRef::new("mock://tts")))
    }
}

fn test_config() -> SessionConfig {
    SessionConfig {
        segment_duration: Duration::from_millis(40),
        // Keep the periodic timers out of the way; the coaching task still
        // runs its immediate first cycle.
        coaching_interval: Duration::from_secs(3600),
        event_buffer: 256,
        ..SessionConfig::default()
    }
}

fn services(script: &[&str], synth_calls: Arc<AtomicUsize>) -> CoachServices {
    CoachServices {
        transcriber: Arc::new(ScriptedTranscriber::new(script)),
        insights: Arc::new(NeutralInsight),
        speech: Arc::new(CountingSynth { calls: synth_calls }),
    }
}

fn orchestrator(script: &[&str]) -> (RecordingOrchestrator, Arc<MicProbe>) {
    let probe = Arc::new(MicProbe::default());
    let mic = ScriptedMic::new(Arc::clone(&probe));
    let orch = RecordingOrchestrator::new(
        test_config(),
        services(script, Arc::new(AtomicUsize::new(0))),
        Box::new(mic),
    );
    (orch, probe)
}

fn drain(rx: &mut mpsc::Receiver<CoachEvent>) -> Vec<CoachEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

#[tokio::test]
async fn segments_are_transcribed_in_close_order() -> Result<()> {
    let script = ["hello there", "the weather is nice", "wrapping up now"];
    let (orch, probe) = orchestrator(&script);

    let mut rx = orch.initialize(UserProfile::default()).await?;
    orch.start().await?;
    sleep(Duration::from_millis(130)).await;
    let stats = orch.stop().await;

    let transcript = orch.transcript().await;
    let texts: Vec<&str> = transcript.iter().map(|e| e.text.as_str()).collect();
    assert_eq!(texts, script);

    assert!(!stats.is_recording);
    assert!(!stats.is_paused);
    assert!(!stats.segment_active);
    assert_eq!(stats.transcript_count, 3);
    assert!(!probe.double_open.load(Ordering::SeqCst));

    // Every transcript update carried a strictly growing snapshot.
    let mut last_len = 0;
    for event in drain(&mut rx) {
        if let CoachEvent::TranscriptUpdated(snapshot) = event {
            assert_eq!(snapshot.len(), last_len + 1);
            last_len = snapshot.len();
        }
    }
    assert_eq!(last_len, 3);

    Ok(())
}

#[tokio::test]
async fn stop_is_a_noop_when_idle_and_restart_opens_a_fresh_segment() -> Result<()> {
    let (orch, probe) = orchestrator(&[]);
    let _rx = orch.initialize(UserProfile::default()).await?;

    // Stop without a session in progress.
    let stats = orch.stop().await;
    assert!(!stats.is_recording);
    assert_eq!(probe.opens.load(Ordering::SeqCst), 0);

    orch.start().await?;
    orch.stop().await;
    orch.start().await?;
    let stats = orch.stop().await;

    assert_eq!(probe.opens.load(Ordering::SeqCst), 2);
    assert!(!stats.is_recording);
    assert!(!probe.double_open.load(Ordering::SeqCst));

    Ok(())
}

#[tokio::test]
async fn starting_twice_does_not_open_a_second_segment() -> Result<()> {
    let (orch, probe) = orchestrator(&[]);
    let _rx = orch.initialize(UserProfile::default()).await?;

    orch.start().await?;
    orch.start().await?;
    assert_eq!(probe.opens.load(Ordering::SeqCst), 1);

    orch.stop().await;
    Ok(())
}

#[tokio::test]
async fn pause_suppresses_rotation_without_stopping_capture() -> Result<()> {
    let script = ["hello there", "the weather is nice"];
    let (orch, _probe) = orchestrator(&script);
    let _rx = orch.initialize(UserProfile::default()).await?;

    orch.start().await?;
    orch.pause();
    sleep(Duration::from_millis(150)).await;

    // Ticks elapsed but no segment was closed.
    let status = orch.status().await;
    assert!(status.is_paused);
    assert!(status.segment_active);
    assert_eq!(status.transcript_count, 0);

    // Pause and resume are idempotent.
    orch.pause();
    orch.resume();
    orch.resume();
    assert!(!orch.status().await.is_paused);

    // Stop still flushes the one segment that was open the whole time.
    let stats = orch.stop().await;
    assert_eq!(stats.transcript_count, 1);
    assert_eq!(orch.transcript().await[0].text, "hello there");

    Ok(())
}

#[tokio::test]
async fn pause_before_start_is_ignored() {
    let (orch, _probe) = orchestrator(&[]);
    orch.pause();
    assert!(!orch.status().await.is_paused);
}

#[tokio::test]
async fn voice_feedback_pauses_capture_and_respects_the_cooldown() -> Result<()> {
    // Both segments score 0.5 (sad + really + very), at the threshold.
    let script = ["I'm really very sad today", "I'm really very sad today"];
    let synth_calls = Arc::new(AtomicUsize::new(0));
    let probe = Arc::new(MicProbe::default());
    let orch = RecordingOrchestrator::new(
        test_config(),
        services(&script, Arc::clone(&synth_calls)),
        Box::new(ScriptedMic::new(Arc::clone(&probe))),
    );
    let mut rx = orch.initialize(UserProfile::default()).await?;
    orch.start().await?;

    // Wait for the first feedback event; capture must be left paused for
    // the consumer to play the audio.
    let feedback = timeout(Duration::from_secs(2), async {
        loop {
            match rx.recv().await {
                Some(CoachEvent::VoiceFeedback(event)) => break event,
                Some(_) => continue,
                None => panic!("event channel closed"),
            }
        }
    })
    .await?;
    assert!(feedback.text.ends_with("You're doing better than you think."));
    assert!(orch.status().await.is_paused);

    // The consumer finishes playback and resumes; the second concerning
    // segment lands inside the cooldown window and is suppressed.
    orch.resume();
    sleep(Duration::from_millis(100)).await;
    orch.stop().await;

    assert_eq!(synth_calls.load(Ordering::SeqCst), 1);
    let more_feedback = drain(&mut rx)
        .iter()
        .filter(|e| matches!(e, CoachEvent::VoiceFeedback(_)))
        .count();
    assert_eq!(more_feedback, 0);
    assert!(!orch.status().await.is_paused);

    Ok(())
}

#[tokio::test]
async fn nudges_fire_on_trigger_phrases_and_are_personalized() -> Result<()> {
    let script = ["i can't focus at all today"];
    let (orch, _probe) = orchestrator(&script);

    let profile = UserProfile {
        name: Some("Alex".to_string()),
        voice_tone: VoiceTone::Direct,
        ..UserProfile::default()
    };
    let mut rx = orch.initialize(profile).await?;
    orch.start().await?;
    sleep(Duration::from_millis(60)).await;
    orch.stop().await;

    let nudge = drain(&mut rx)
        .into_iter()
        .find_map(|e| match e {
            CoachEvent::NudgeTriggered(nudge) => Some(nudge),
            _ => None,
        })
        .expect("nudge should fire");

    assert_eq!(nudge.trigger, "can't focus");
    assert_eq!(nudge.category, "focus");
    assert!(nudge.message.starts_with("Alex, Take 5 minutes."));

    Ok(())
}

#[tokio::test]
async fn clear_data_empties_transcript_and_moments_together() -> Result<()> {
    // Significant (moment) but not concerning; also trips the activity rule.
    let script = ["i realized i struggle with this deadline"];
    let (orch, _probe) = orchestrator(&script);
    let mut rx = orch.initialize(UserProfile::default()).await?;

    orch.start().await?;
    sleep(Duration::from_millis(60)).await;
    orch.stop().await;

    assert_eq!(orch.transcript().await.len(), 1);
    assert_eq!(orch.moments().await.len(), 1);
    assert!(drain(&mut rx)
        .iter()
        .any(|e| matches!(e, CoachEvent::MomentDetected(_))));

    orch.clear_data().await;
    assert!(orch.transcript().await.is_empty());
    assert!(orch.moments().await.is_empty());
    // Coaching history survives a data clear.
    assert!(!orch.coaching_history().await.is_empty());

    Ok(())
}

#[tokio::test]
async fn initialize_fails_when_microphone_access_is_denied() {
    let synth_calls = Arc::new(AtomicUsize::new(0));
    let orch = RecordingOrchestrator::new(
        test_config(),
        services(&[], synth_calls),
        Box::new(SimulatedMicrophone::without_access()),
    );

    let err = orch
        .initialize(UserProfile::default())
        .await
        .expect_err("access should be denied");
    assert!(err.to_string().contains("microphone access is required"));
}
