//! Audio capture collaborators.
//!
//! This module provides:
//! - [`AudioBuffer`]: the frozen PCM buffer handed to the pipeline, with the
//!   one serialization convention used for hashing (little-endian `i16`)
//! - [`CaptureConfig`]: sample rate, duration and meter settings
//! - WAV file input and output via `hound`
//! - A terminal volume meter
//! - Microphone capture via `cpal` (`capture` feature)

mod buffer;
mod meter;
#[cfg(feature = "capture")]
mod mic;
mod wav;

pub use buffer::{sample_to_i16, AudioBuffer, CaptureConfig, MAX_DURATION, MAX_SAMPLE_RATE};
pub use meter::{rms_volume, volume_bar, VolumeMeter};
#[cfg(feature = "capture")]
pub use mic::MicrophoneCapture;
pub use wav::{read_wav, write_wav, WavFileSource};
