//! Core traits for entropy sources and audio capture.
//!
//! This module defines the two seams of the pipeline:
//!
//! - [`EntropySource`]: Fills buffers from a cryptographically secure generator
//! - [`AudioCapture`]: Hands the pipeline one finished audio buffer
//!
//! # Implementing a custom capture backend
//!
//! Any backend that can produce PCM samples can feed the pipeline:
//!
//! ```rust
//! use std::time::Duration;
//! use audio_entropy_bip39::{AudioBuffer, AudioCapture, Error};
//!
//! struct ToneCapture;
//!
//! impl AudioCapture for ToneCapture {
//!     fn capture(&mut self, duration: Duration) -> Result<AudioBuffer, Error> {
//!         let frames = (duration.as_secs_f64() * 8_000.0) as usize;
//!         let samples: Vec<i16> = (0..frames).map(|i| ((i % 64) as i16 - 32) * 512).collect();
//!         Ok(AudioBuffer::new(samples, 8_000, 1))
//!     }
//! }
//!
//! let buffer = ToneCapture.capture(Duration::from_millis(250)).unwrap();
//! assert_eq!(buffer.frames(), 2_000);
//! ```

use std::time::Duration;

use crate::{AudioBuffer, Error};

/// Source of cryptographically secure random bytes.
///
/// Implementations must be backed by a CSPRNG that cannot be seeded or
/// replayed by the caller. A failing source must report
/// [`Error::SourceUnavailable`] instead of degrading to a weaker generator.
///
/// # Implementors
///
/// - [`OsEntropy`](crate::OsEntropy): the operating system generator
pub trait EntropySource {
    /// Fill `dest` entirely with random bytes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SourceUnavailable`] if the generator cannot deliver.
    /// On error the contents of `dest` are unspecified and must not be used.
    fn fill(&self, dest: &mut [u8]) -> Result<(), Error>;
}

/// Capability to record a complete audio buffer.
///
/// The pipeline only ever sees the finished buffer: streaming, device
/// overflow handling and metering stay inside the implementation. A call
/// returns once `duration` of audio has been recorded (or the available
/// input is exhausted) and the buffer is frozen.
///
/// # Implementors
///
/// - [`WavFileSource`](crate::WavFileSource): reads a PCM WAV file
/// - `MicrophoneCapture`: the default input device (`capture` feature)
pub trait AudioCapture {
    /// Record up to `duration` of audio.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Capture`] or [`Error::Wav`] if the backend fails.
    /// Implementations may return an empty buffer; the pipeline rejects it
    /// with [`Error::EmptyInput`] at the hashing stage.
    fn capture(&mut self, duration: Duration) -> Result<AudioBuffer, Error>;
}
