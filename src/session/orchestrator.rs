use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use chrono::{Timelike, Utc};
use tokio::sync::{mpsc, watch, Mutex};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant as TokioInstant, MissedTickBehavior};
use tracing::{debug, error, info, warn};

use super::config::SessionConfig;
use super::events::{
    CoachEvent, CoachingTip, Moment, Nudge, TipSource, TranscriptEntry, VoiceFeedbackEvent,
};
use super::stats::SessionStats;
use crate::audio::{AudioRef, CaptureDevice};
use crate::coaching::personalize::personalize;
use crate::coaching::rules::match_static_nudges;
use crate::coaching::scheduler::{activity_tip, BackgroundCoach};
use crate::detect::concern::compose_feedback;
use crate::detect::{ConcernDetector, MomentDetector};
use crate::profile::UserProfile;
use crate::services::CoachServices;

/// A closed capture segment awaiting the processing pipeline.
struct ClosedSegment {
    audio: AudioRef,
    duration_secs: f64,
}

/// State shared between the orchestrator handle and its tasks.
struct Shared {
    config: SessionConfig,
    services: CoachServices,
    concern: ConcernDetector,
    moments_detector: MomentDetector,

    is_recording: AtomicBool,
    is_paused: AtomicBool,

    profile: Mutex<UserProfile>,
    transcript: Mutex<Vec<TranscriptEntry>>,
    moments: Mutex<Vec<Moment>>,
    coaching_history: Mutex<Vec<CoachingTip>>,
    last_voice_feedback: Mutex<Option<Instant>>,

    events: Mutex<Option<mpsc::Sender<CoachEvent>>>,
}

impl Shared {
    async fn emit(&self, event: CoachEvent) {
        let guard = self.events.lock().await;
        if let Some(tx) = guard.as_ref() {
            if tx.send(event).await.is_err() {
                warn!("event consumer dropped, discarding event");
            }
        }
    }

    fn set_paused(&self, paused: bool) {
        // Pause is meaningless without an active session.
        if paused && !self.is_recording.load(Ordering::SeqCst) {
            return;
        }
        self.is_paused.store(paused, Ordering::SeqCst);
    }
}

/// The continuous-recording state machine.
///
/// Owns the single capture device, rotates fixed-duration segments, drives
/// the per-segment processing pipeline, and runs the background coaching
/// timer. Explicitly constructed and injected; there is no global instance.
pub struct RecordingOrchestrator {
    shared: Arc<Shared>,
    device: Arc<Mutex<Box<dyn CaptureDevice>>>,

    rotation_task: Mutex<Option<JoinHandle<()>>>,
    coaching_task: Mutex<Option<JoinHandle<()>>>,
    pipeline_task: Mutex<Option<JoinHandle<()>>>,

    pipeline_tx: Mutex<Option<mpsc::Sender<ClosedSegment>>>,
    shutdown_tx: Mutex<Option<watch::Sender<()>>>,
}

impl RecordingOrchestrator {
    pub fn new(
        config: SessionConfig,
        services: CoachServices,
        device: Box<dyn CaptureDevice>,
    ) -> Self {
        let concern = ConcernDetector::new(config.concern_weights());
        let moments_detector = MomentDetector::new(config.moment_threshold);

        Self {
            shared: Arc::new(Shared {
                config,
                services,
                concern,
                moments_detector,
                is_recording: AtomicBool::new(false),
                is_paused: AtomicBool::new(false),
                profile: Mutex::new(UserProfile::default()),
                transcript: Mutex::new(Vec::new()),
                moments: Mutex::new(Vec::new()),
                coaching_history: Mutex::new(Vec::new()),
                last_voice_feedback: Mutex::new(None),
                events: Mutex::new(None),
            }),
            device: Arc::new(Mutex::new(device)),
            rotation_task: Mutex::new(None),
            coaching_task: Mutex::new(None),
            pipeline_task: Mutex::new(None),
            pipeline_tx: Mutex::new(None),
            shutdown_tx: Mutex::new(None),
        }
    }

    /// Verify capture access, store the user profile, and open the event
    /// channel. A denied microphone permission is fatal here.
    pub async fn initialize(
        &self,
        profile: UserProfile,
    ) -> Result<mpsc::Receiver<CoachEvent>> {
        {
            let mut device = self.device.lock().await;
            device
                .ensure_access()
                .await
                .context("microphone access is required for continuous recording")?;
        }

        *self.shared.profile.lock().await = profile;

        let (tx, rx) = mpsc::channel(self.shared.config.event_buffer);
        *self.shared.events.lock().await = Some(tx);

        info!(
            "recording service initialized ({}s segments)",
            self.shared.config.segment_duration.as_secs()
        );

        Ok(rx)
    }

    /// Start continuous recording: open the first segment, then spawn the
    /// rotation, pipeline, and background coaching tasks.
    pub async fn start(&self) -> Result<()> {
        if self.shared.is_recording.load(Ordering::SeqCst) {
            warn!("recording already in progress");
            return Ok(());
        }

        {
            let mut device = self.device.lock().await;
            device
                .start_segment()
                .await
                .context("failed to open capture segment")?;
        }

        self.shared.is_recording.store(true, Ordering::SeqCst);
        self.shared.is_paused.store(false, Ordering::SeqCst);

        let (shutdown_tx, shutdown_rx) = watch::channel(());
        let (seg_tx, seg_rx) = mpsc::channel::<ClosedSegment>(16);

        let pipeline = tokio::spawn(run_pipeline(Arc::clone(&self.shared), seg_rx));
        let rotation = tokio::spawn(run_rotation(
            Arc::clone(&self.shared),
            Arc::clone(&self.device),
            seg_tx.clone(),
            shutdown_rx.clone(),
        ));
        let coaching = tokio::spawn(run_coaching(Arc::clone(&self.shared), shutdown_rx));

        *self.pipeline_tx.lock().await = Some(seg_tx);
        *self.shutdown_tx.lock().await = Some(shutdown_tx);
        *self.pipeline_task.lock().await = Some(pipeline);
        *self.rotation_task.lock().await = Some(rotation);
        *self.coaching_task.lock().await = Some(coaching);

        info!(
            "continuous recording started ({}s segments)",
            self.shared.config.segment_duration.as_secs()
        );

        Ok(())
    }

    /// Suppress segment rotation while external audio plays.
    ///
    /// The capture timer keeps ticking; rotation resumes on the first tick
    /// after [`resume`](Self::resume). Idempotent.
    pub fn pause(&self) {
        if !self.shared.is_recording.load(Ordering::SeqCst) {
            warn!("pause requested with no recording in progress");
            return;
        }
        self.shared.set_paused(true);
        info!("recording paused for audio playback");
    }

    /// Clear the rotation-suppression flag. Idempotent.
    pub fn resume(&self) {
        self.shared.is_paused.store(false, Ordering::SeqCst);
        info!("recording resumed");
    }

    /// Stop recording: cancel both timers, close and flush any open
    /// segment, and wait for the pipeline to drain. Logged no-op when idle.
    pub async fn stop(&self) -> SessionStats {
        if !self.shared.is_recording.swap(false, Ordering::SeqCst) {
            warn!("no recording in progress");
            return self.status().await;
        }
        self.shared.is_paused.store(false, Ordering::SeqCst);

        info!("stopping continuous recording");

        // No rotation may start after this; both timer tasks observe the
        // shutdown signal or the cleared flag.
        if let Some(tx) = self.shutdown_tx.lock().await.take() {
            let _ = tx.send(());
        }

        if let Some(task) = self.rotation_task.lock().await.take() {
            if let Err(e) = task.await {
                error!("rotation task panicked: {e}");
            }
        }
        if let Some(task) = self.coaching_task.lock().await.take() {
            if let Err(e) = task.await {
                error!("coaching task panicked: {e}");
            }
        }

        // Close the final segment and hand it to the pipeline.
        let final_clip = {
            let mut device = self.device.lock().await;
            match device.stop_segment().await {
                Ok(clip) => clip,
                Err(e) => {
                    error!("failed to close final capture segment: {e:#}");
                    None
                }
            }
        };

        let seg_tx = self.pipeline_tx.lock().await.take();
        if let (Some(tx), Some(audio)) = (seg_tx.as_ref(), final_clip) {
            let segment = ClosedSegment {
                audio,
                duration_secs: self.shared.config.segment_duration.as_secs_f64(),
            };
            if tx.send(segment).await.is_err() {
                warn!("pipeline closed before final segment could be flushed");
            }
        }
        drop(seg_tx);

        // Pipeline exits once every queued segment is processed.
        if let Some(task) = self.pipeline_task.lock().await.take() {
            if let Err(e) = task.await {
                error!("pipeline task panicked: {e}");
            }
        }

        info!("continuous recording stopped");
        self.status().await
    }

    /// Replace the user profile mid-session.
    pub async fn update_profile(&self, profile: UserProfile) {
        *self.shared.profile.lock().await = profile;
    }

    /// Full transcript snapshot.
    pub async fn transcript(&self) -> Vec<TranscriptEntry> {
        self.shared.transcript.lock().await.clone()
    }

    /// Detected moments snapshot.
    pub async fn moments(&self) -> Vec<Moment> {
        self.shared.moments.lock().await.clone()
    }

    /// Generated coaching tips snapshot.
    pub async fn coaching_history(&self) -> Vec<CoachingTip> {
        self.shared.coaching_history.lock().await.clone()
    }

    /// Empty the transcript and moment buffers. Both locks are held for the
    /// duration, so callers never observe one cleared without the other.
    pub async fn clear_data(&self) {
        let mut transcript = self.shared.transcript.lock().await;
        let mut moments = self.shared.moments.lock().await;
        transcript.clear();
        moments.clear();
        info!("transcript and moment buffers cleared");
    }

    pub async fn status(&self) -> SessionStats {
        SessionStats {
            is_recording: self.shared.is_recording.load(Ordering::SeqCst),
            is_paused: self.shared.is_paused.load(Ordering::SeqCst),
            transcript_count: self.shared.transcript.lock().await.len(),
            moment_count: self.shared.moments.lock().await.len(),
            coaching_count: self.shared.coaching_history.lock().await.len(),
            segment_active: self.device.lock().await.is_capturing(),
        }
    }
}

/// Segment rotation driver: every period, close the current segment, queue
/// its audio for processing, and open the next one.
///
/// Rotation runs inline in this task, so a slow device call can never start
/// a second concurrent rotation; missed ticks are skipped.
async fn run_rotation(
    shared: Arc<Shared>,
    device: Arc<Mutex<Box<dyn CaptureDevice>>>,
    seg_tx: mpsc::Sender<ClosedSegment>,
    mut shutdown: watch::Receiver<()>,
) {
    let period = shared.config.segment_duration;
    let mut ticker = interval_at(TokioInstant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                if !shared.is_recording.load(Ordering::SeqCst) {
                    break;
                }
                if shared.is_paused.load(Ordering::SeqCst) {
                    debug!("rotation skipped while paused");
                    continue;
                }

                let clip = {
                    let mut dev = device.lock().await;
                    let clip = match dev.stop_segment().await {
                        Ok(clip) => clip,
                        Err(e) => {
                            error!("failed to close capture segment: {e:#}");
                            None
                        }
                    };
                    // Keep capturing even if the close failed.
                    if let Err(e) = dev.start_segment().await {
                        error!("failed to open next capture segment: {e:#}");
                    }
                    clip
                };

                if let Some(audio) = clip {
                    let segment = ClosedSegment {
                        audio,
                        duration_secs: period.as_secs_f64(),
                    };
                    if seg_tx.send(segment).await.is_err() {
                        break;
                    }
                }
            }
            _ = shutdown.changed() => break,
        }
    }

    info!("segment rotation stopped");
}

/// Single pipeline worker. Segments arrive in close order and are processed
/// one at a time, so transcript appends can never reorder.
async fn run_pipeline(shared: Arc<Shared>, mut seg_rx: mpsc::Receiver<ClosedSegment>) {
    while let Some(segment) = seg_rx.recv().await {
        process_segment(&shared, segment).await;
    }
    info!("segment pipeline drained");
}

/// Run every pipeline step for one closed segment. Each step tolerates
/// failure: an error is logged and the remaining steps still run.
async fn process_segment(shared: &Arc<Shared>, segment: ClosedSegment) {
    // 1. Transcribe; silent or failed segments are dropped without notice.
    let text = match shared.services.transcriber.transcribe(&segment.audio).await {
        Ok(Some(text)) if !text.trim().is_empty() => text,
        Ok(_) => {
            debug!("no speech detected in segment");
            return;
        }
        Err(e) => {
            warn!("transcription failed, treating segment as silent: {e}");
            return;
        }
    };

    // 2. Append to the transcript. The entries preceding this one feed the
    // concern detector's repetition term.
    let (snapshot, prior) = {
        let mut transcript = shared.transcript.lock().await;
        let prior: Vec<TranscriptEntry> =
            transcript.iter().rev().take(3).rev().cloned().collect();
        transcript.push(TranscriptEntry {
            timestamp: Utc::now(),
            text: text.clone(),
            audio: segment.audio.clone(),
            duration_secs: segment.duration_secs,
        });
        (transcript.clone(), prior)
    };
    shared.emit(CoachEvent::TranscriptUpdated(snapshot)).await;

    // 3. Concern analysis and possible voice feedback.
    analyze_concern(shared, &text, &prior).await;

    // 4. Static keyword nudges; only the first match is surfaced.
    if let Some(rule) = match_static_nudges(&text).into_iter().next() {
        let profile = shared.profile.lock().await.clone();
        let nudge = Nudge {
            trigger: rule.trigger.to_string(),
            message: personalize(rule.message, &profile),
            category: rule.category.to_string(),
            priority: rule.priority,
            timestamp: Utc::now(),
        };
        shared.emit(CoachEvent::NudgeTriggered(nudge)).await;
    }

    // 5. Activity-based coaching over the recent transcript.
    {
        let profile = shared.profile.lock().await.clone();
        let tip = {
            let transcript = shared.transcript.lock().await;
            activity_tip(&transcript, &profile)
        };
        if let Some(tip) = tip {
            shared.coaching_history.lock().await.push(tip.clone());
            shared.emit(CoachEvent::CoachingGenerated(tip)).await;
        }
    }

    // 6. Moment detection.
    if let Some(moment) = shared
        .moments_detector
        .detect(&text, Some(segment.audio.clone()))
    {
        shared.moments.lock().await.push(moment.clone());
        shared.emit(CoachEvent::MomentDetected(moment)).await;
    }
}

/// Score the segment for concerning content and, when warranted and outside
/// the cooldown window, synthesize and emit voice feedback.
async fn analyze_concern(shared: &Arc<Shared>, text: &str, prior: &[TranscriptEntry]) {
    let report = shared.services.insights.generate_insights(text).await;

    let score = shared.concern.score(text, &report, prior);
    if score < shared.concern.threshold() {
        return;
    }
    info!("concerning content detected (score {score:.2})");

    {
        let last = shared.last_voice_feedback.lock().await;
        if let Some(at) = *last {
            if at.elapsed() < shared.config.voice_feedback_cooldown {
                debug!("voice feedback skipped due to cooldown");
                return;
            }
        }
    }

    // Pause rotation so the synthesized voice is not captured back.
    shared.set_paused(true);

    let feedback = compose_feedback(&report, text);

    match shared.services.speech.synthesize(&feedback).await {
        Ok(Some(audio)) => {
            *shared.last_voice_feedback.lock().await = Some(Instant::now());
            let event = VoiceFeedbackEvent {
                text: feedback,
                audio,
                timestamp: Utc::now(),
                source: TipSource::RealTimeFeedback,
            };
            shared.emit(CoachEvent::VoiceFeedback(event)).await;
            info!("voice feedback delivered");
            // Capture stays paused until the playback consumer resumes.
        }
        Ok(None) => {
            warn!("speech synthesis produced no audio, resuming capture");
            shared.set_paused(false);
        }
        Err(e) => {
            warn!("speech synthesis failed, resuming capture: {e}");
            shared.set_paused(false);
        }
    }
}

/// Background coaching driver: an immediate run, then one per interval.
async fn run_coaching(shared: Arc<Shared>, mut shutdown: watch::Receiver<()>) {
    let coach = BackgroundCoach::new(
        Arc::clone(&shared.services.insights),
        shared.config.pattern_gap_hours,
        shared.config.pattern_min_entries,
    );

    let mut ticker = interval_at(TokioInstant::now(), shared.config.coaching_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                if !shared.is_recording.load(Ordering::SeqCst) {
                    break;
                }

                let transcript = shared.transcript.lock().await.clone();
                let profile = shared.profile.lock().await.clone();
                let history = shared.coaching_history.lock().await.clone();
                let hour = chrono::Local::now().hour();

                let tips = coach
                    .generate(&transcript, &profile, &history, hour, Utc::now())
                    .await;

                if !tips.is_empty() {
                    shared.coaching_history.lock().await.extend(tips.iter().cloned());
                    for tip in tips {
                        shared.emit(CoachEvent::CoachingGenerated(tip)).await;
                    }
                }
            }
            _ = shutdown.changed() => break,
        }
    }

    info!("background coaching stopped");
}
