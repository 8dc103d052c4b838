use anyhow::{bail, Result};
use tracing::info;

use super::capture::{AudioRef, CaptureDevice};

/// In-process capture device that yields synthetic clip handles.
///
/// Used by the demo binary and by tests; stands in for a real microphone
/// backend without touching platform audio APIs.
pub struct SimulatedMicrophone {
    access_granted: bool,
    capturing: bool,
    segment_counter: usize,
}

impl SimulatedMicrophone {
    pub fn new() -> Self {
        Self {
            access_granted: true,
            capturing: false,
            segment_counter: 0,
        }
    }

    /// Simulate a denied microphone permission.
    pub fn without_access() -> Self {
        Self {
            access_granted: false,
            capturing: false,
            segment_counter: 0,
        }
    }
}

impl Default for SimulatedMicrophone {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl CaptureDevice for SimulatedMicrophone {
    async fn ensure_access(&mut self) -> Result<()> {
        if !self.access_granted {
            bail!("microphone permission denied");
        }
        Ok(())
    }

    async fn start_segment(&mut self) -> Result<()> {
        if self.capturing {
            bail!("capture segment already open");
        }
        self.capturing = true;
        info!("opened capture segment {}", self.segment_counter);
        Ok(())
    }

    async fn stop_segment(&mut self) -> Result<Option<AudioRef>> {
        if !self.capturing {
            return Ok(None);
        }
        self.capturing = false;
        let clip = AudioRef::new(format!("sim://clip-{}", self.segment_counter));
        self.segment_counter += 1;
        Ok(Some(clip))
    }

    fn is_capturing(&self) -> bool {
        self.capturing
    }

    fn name(&self) -> &str {
        "simulated-microphone"
    }
}
