//! PCM buffer and capture configuration.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::Error;

/// Longest recording a configuration may request.
pub const MAX_DURATION: Duration = Duration::from_secs(3_600);

/// Highest sample rate a configuration may request, in Hz.
pub const MAX_SAMPLE_RATE: u32 = 384_000;

/// Audio capture configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureConfig {
    /// Sample rate in Hz (default: 44100)
    pub sample_rate: u32,
    /// Number of channels in the delivered buffer (default: 1 for mono)
    pub channels: u16,
    /// How long to record (default: 15 s)
    pub duration: Duration,
    /// Frames between volume meter updates (default: rate / 10)
    pub frames_per_buffer: u32,
    /// Width of the volume bar in columns (default: 50)
    pub meter_width: usize,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            sample_rate: 44_100,
            channels: 1,
            duration: Duration::from_secs(15),
            frames_per_buffer: 4_410,
            meter_width: 50,
        }
    }
}

impl CaptureConfig {
    /// Set the sample rate; frames per buffer follow at a tenth of a second.
    pub fn with_sample_rate(mut self, rate: u32) -> Self {
        self.sample_rate = rate;
        self.frames_per_buffer = (rate / 10).max(1);
        self
    }

    /// Set the recording duration.
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Set the meter width.
    pub fn with_meter_width(mut self, width: usize) -> Self {
        self.meter_width = width;
        self
    }

    /// Number of frames a full recording holds.
    pub fn expected_frames(&self) -> usize {
        (self.duration.as_secs_f64() * self.sample_rate as f64) as usize
    }

    /// Time between volume meter updates: `frames_per_buffer / sample_rate`.
    pub fn meter_interval(&self) -> Duration {
        if self.sample_rate == 0 {
            return Duration::ZERO;
        }
        Duration::from_secs_f64(self.frames_per_buffer as f64 / self.sample_rate as f64)
    }

    /// Reject configurations that cannot produce any audio, or that would
    /// need more memory than a bounded recording.
    pub fn validate(&self) -> Result<(), Error> {
        if self.sample_rate == 0 {
            return Err(Error::Capture("sample rate must be non-zero".into()));
        }
        if self.sample_rate > MAX_SAMPLE_RATE {
            return Err(Error::Capture(format!(
                "sample rate must be at most {} Hz, got {}",
                MAX_SAMPLE_RATE, self.sample_rate
            )));
        }
        if self.channels == 0 {
            return Err(Error::Capture("channel count must be non-zero".into()));
        }
        if self.duration.is_zero() {
            return Err(Error::Capture("recording duration must be non-zero".into()));
        }
        if self.duration > MAX_DURATION {
            return Err(Error::Capture(format!(
                "recording duration must be at most {}s, got {:.0}s",
                MAX_DURATION.as_secs(),
                self.duration.as_secs_f64()
            )));
        }
        if self.frames_per_buffer == 0 {
            return Err(Error::Capture("frames per buffer must be non-zero".into()));
        }
        if self.meter_width == 0 {
            return Err(Error::Capture("meter width must be non-zero".into()));
        }
        Ok(())
    }
}

/// Convert a float sample to 16-bit PCM.
///
/// The input is clamped to `[-1.0, 1.0]`, scaled by 32767 and truncated
/// toward zero. NaN maps to 0.
pub fn sample_to_i16(sample: f32) -> i16 {
    if sample.is_nan() {
        return 0;
    }
    (sample.clamp(-1.0, 1.0) * i16::MAX as f32) as i16
}

/// A finished recording of interleaved 16-bit PCM samples.
#[derive(Clone, PartialEq, Eq)]
pub struct AudioBuffer {
    samples: Vec<i16>,
    sample_rate: u32,
    channels: u16,
}

impl AudioBuffer {
    /// Wrap interleaved PCM samples.
    pub fn new(samples: Vec<i16>, sample_rate: u32, channels: u16) -> Self {
        Self {
            samples,
            sample_rate,
            channels: channels.max(1),
        }
    }

    /// Convert float samples with [`sample_to_i16`].
    pub fn from_f32(samples: &[f32], sample_rate: u32, channels: u16) -> Self {
        Self::new(
            samples.iter().map(|&s| sample_to_i16(s)).collect(),
            sample_rate,
            channels,
        )
    }

    /// Interleaved samples.
    pub fn samples(&self) -> &[i16] {
        &self.samples
    }

    /// Sample rate in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Channel count.
    pub fn channels(&self) -> u16 {
        self.channels
    }

    /// Number of frames (samples per channel).
    pub fn frames(&self) -> usize {
        self.samples.len() / self.channels as usize
    }

    /// Total number of samples across channels.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the buffer holds no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Recorded time.
    pub fn duration(&self) -> Duration {
        if self.sample_rate == 0 {
            return Duration::ZERO;
        }
        Duration::from_secs_f64(self.frames() as f64 / self.sample_rate as f64)
    }

    /// Keep at most `duration` of audio, cutting on a frame boundary.
    pub fn truncate_to(&mut self, duration: Duration) {
        let frames = (duration.as_secs_f64() * self.sample_rate as f64) as usize;
        self.samples.truncate(frames.saturating_mul(self.channels as usize));
    }

    /// Serialize as little-endian 16-bit PCM, two bytes per sample.
    ///
    /// This is the byte stream the pipeline hashes.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.samples.len() * 2);
        for sample in &self.samples {
            bytes.extend_from_slice(&sample.to_le_bytes());
        }
        bytes
    }

    /// Whether every sample is zero.
    pub fn is_silent(&self) -> bool {
        self.samples.iter().all(|&s| s == 0)
    }
}

impl fmt::Debug for AudioBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AudioBuffer")
            .field("samples", &self.samples.len())
            .field("sample_rate", &self.sample_rate)
            .field("channels", &self.channels)
            .finish()
    }
}
