use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Opaque handle to a captured audio clip.
///
/// The engine never inspects clip contents; it only passes handles between
/// the capture device, the transcription service, and the stored transcript
/// and moment records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioRef {
    uri: String,
}

impl AudioRef {
    pub fn new(uri: impl Into<String>) -> Self {
        Self { uri: uri.into() }
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }
}

/// Audio capture device abstraction.
///
/// Platform recording primitives live behind this trait; the orchestrator
/// owns exactly one device and is the only caller of its segment methods.
#[async_trait::async_trait]
pub trait CaptureDevice: Send + Sync {
    /// Verify that audio capture is permitted.
    ///
    /// A denied microphone permission surfaces here and is fatal to
    /// initialization; there is no retry.
    async fn ensure_access(&mut self) -> Result<()>;

    /// Open a new capture segment. Fails if a segment is already open.
    async fn start_segment(&mut self) -> Result<()>;

    /// Close the current capture segment and return a handle to its audio.
    ///
    /// Returns `None` when no segment is open.
    async fn stop_segment(&mut self) -> Result<Option<AudioRef>>;

    /// Check if a segment is currently being captured
    fn is_capturing(&self) -> bool;

    /// Get device name for logging
    fn name(&self) -> &str;
}
