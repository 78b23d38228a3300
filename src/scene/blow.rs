//! Blow detection from microphone volume
//!
//! The monitor is Idle until a `FrequencySource` is attached, then samples
//! once per frame. Detection is level-triggered: every frame above the
//! threshold reports a blow.

use crate::consts::BLOW_THRESHOLD;
use crate::error::MicError;

/// A live frequency-magnitude feed (the browser's AnalyserNode, or a test fake)
pub trait FrequencySource {
    /// Length of the sampling buffer
    fn buffer_len(&self) -> usize;

    /// Fill `buf` with the current byte frequency magnitudes (0-255)
    fn read_frequencies(&mut self, buf: &mut [u8]);

    /// Stop capturing and free host resources
    fn release(&mut self) {}
}

/// Runs a cleanup closure on drop unless disarmed. Used while a capture is
/// half built, so an early `?` return still frees what was acquired.
pub struct ReleaseGuard<F: FnOnce()> {
    cleanup: Option<F>,
}

impl<F: FnOnce()> ReleaseGuard<F> {
    pub fn new(cleanup: F) -> Self {
        Self {
            cleanup: Some(cleanup),
        }
    }

    /// Setup succeeded; ownership passes elsewhere
    pub fn disarm(mut self) {
        self.cleanup = None;
    }
}

impl<F: FnOnce()> Drop for ReleaseGuard<F> {
    fn drop(&mut self) {
        if let Some(cleanup) = self.cleanup.take() {
            cleanup();
        }
    }
}

/// Monitor lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorState {
    /// No stream (not yet granted, failed, or released)
    Idle,
    /// Stream acquired, sampling every frame
    Sampling,
}

/// Result of one frame's sample
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Sample {
    Idle,
    Quiet(f32),
    Blow(f32),
}

impl Sample {
    pub fn is_blow(&self) -> bool {
        matches!(self, Sample::Blow(_))
    }
}

/// Mean of the buffer, 0 for an empty buffer
pub fn mean_volume(buf: &[u8]) -> f32 {
    if buf.is_empty() {
        return 0.0;
    }
    let sum: u64 = buf.iter().map(|&b| b as u64).sum();
    sum as f32 / buf.len() as f32
}

pub struct BlowMonitor {
    source: Option<Box<dyn FrequencySource>>,
    buffer: Vec<u8>,
    threshold: f32,
    last_error: Option<MicError>,
}

impl Default for BlowMonitor {
    fn default() -> Self {
        Self::new(BLOW_THRESHOLD)
    }
}

impl BlowMonitor {
    pub fn new(threshold: f32) -> Self {
        Self {
            source: None,
            buffer: Vec::new(),
            threshold,
            last_error: None,
        }
    }

    pub fn state(&self) -> MonitorState {
        if self.source.is_some() {
            MonitorState::Sampling
        } else {
            MonitorState::Idle
        }
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Idle -> Sampling. Ignored if already sampling.
    pub fn attach(&mut self, source: Box<dyn FrequencySource>) -> bool {
        if self.source.is_some() {
            log::warn!("Microphone already attached, ignoring second stream");
            return false;
        }
        self.buffer = vec![0; source.buffer_len()];
        self.source = Some(source);
        self.last_error = None;
        log::info!("Blow monitor sampling ({} bins)", self.buffer.len());
        true
    }

    /// Record an acquisition failure; the monitor stays Idle
    pub fn fail(&mut self, err: MicError) {
        log::error!("Mic not available: {err}");
        self.last_error = Some(err);
    }

    pub fn last_error(&self) -> Option<&MicError> {
        self.last_error.as_ref()
    }

    /// Read the current buffer and compare its mean against the threshold
    pub fn sample(&mut self) -> Sample {
        let Some(source) = self.source.as_mut() else {
            return Sample::Idle;
        };
        source.read_frequencies(&mut self.buffer);
        let volume = mean_volume(&self.buffer);
        log::trace!("volume {volume:.1}");
        if volume > self.threshold {
            Sample::Blow(volume)
        } else {
            Sample::Quiet(volume)
        }
    }

    /// Tear down the stream and go back to Idle
    pub fn release(&mut self) {
        if let Some(mut source) = self.source.take() {
            source.release();
            self.buffer.clear();
            log::info!("Microphone released");
        }
    }
}

impl Drop for BlowMonitor {
    fn drop(&mut self) {
        self.release();
    }
}
