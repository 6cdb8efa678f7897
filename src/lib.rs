//! audio-entropy-bip39: BIP-39 mnemonics from OS entropy mixed with ambient audio.
//!
//! This crate derives a 24-word BIP-39 mnemonic from two independent sources:
//! a value drawn from the operating system CSPRNG and a digitized sample of
//! ambient audio. The audio never replaces the OS entropy; it is hashed and
//! mixed in, so the result is at least as strong as the CSPRNG value alone.
//!
//! # Architecture
//!
//! The pipeline is a single forward pass with no shared state:
//!
//! ```text
//! generate_entropy ──┬──> derive_key            (display / diagnostics only)
//!                    │
//! audio bytes ──> hash_audio ──> combine(entropy ‖ audio digest) ──> encode_mnemonic
//! ```
//!
//! - [`entropy`]: OS-backed entropy behind the [`EntropySource`] trait
//! - [`kdf`]: one-shot HKDF-SHA256 expansion of the entropy
//! - [`combine`]: audio hashing and the entropy/audio mix
//! - [`mnemonic`]: checksum and 11-bit wordlist encoding
//! - [`pipeline`]: the whole pass as one call, yielding a [`Derivation`]
//! - [`transcript`]: a sealed, serializable record of a derivation
//! - [`audio`]: capture collaborators (WAV files, microphone) and the volume meter
//!
//! # Example
//!
//! ```rust
//! use audio_entropy_bip39::{derive, generate_entropy, AudioBuffer};
//!
//! let entropy = generate_entropy(256).unwrap();
//!
//! // Normally captured from a microphone; any non-empty PCM buffer works.
//! let audio = AudioBuffer::from_f32(&[0.25, -0.5, 0.125, 0.0], 44_100, 1);
//!
//! let derivation = derive(&entropy, &audio.to_bytes()).unwrap();
//! assert_eq!(derivation.mnemonic().word_count(), 24);
//! println!("Audio hash: {}", derivation.audio_digest_hex());
//! ```
//!
//! # Audio serialization
//!
//! Audio is always hashed as interleaved little-endian signed 16-bit PCM.
//! Floating point samples are clamped to `[-1.0, 1.0]`, scaled by 32767 and
//! truncated toward zero. Identical sample buffers therefore always produce
//! identical digests, whichever capture backend produced them.
//!
//! # Failure policy
//!
//! Every stage returns [`Result`]. There are no retries and no fallbacks: if
//! the OS generator fails, or the audio buffer is empty, the derivation is
//! aborted rather than completed with weaker input.

#![forbid(unsafe_code)]

pub mod audio;
pub mod combine;
pub mod entropy;
pub mod kdf;
pub mod mnemonic;
pub mod pipeline;
pub mod transcript;
pub mod traits;

use std::fmt;

// Re-exports
#[cfg(feature = "capture")]
pub use audio::MicrophoneCapture;
pub use audio::{
    read_wav, rms_volume, volume_bar, write_wav, AudioBuffer, CaptureConfig, WavFileSource,
};
pub use combine::{combine, hash_audio, AudioHasher};
pub use entropy::{generate_entropy, generate_entropy_from, Entropy, OsEntropy};
pub use kdf::{derive_default_key, derive_key, DerivedKey};
pub use mnemonic::{encode_mnemonic, Mnemonic};
pub use pipeline::{derive, run, Derivation};
pub use traits::{AudioCapture, EntropySource};
pub use transcript::Transcript;

/// A SHA-256 digest.
pub type Digest32 = [u8; 32];

/// Entropy lengths in bytes accepted by BIP-39 (128 to 256 bits in steps of 32).
pub const VALID_ENTROPY_LENGTHS: [usize; 5] = [16, 20, 24, 28, 32];

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Pipeline stage an error originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Drawing entropy from the OS generator.
    Entropy,
    /// HKDF expansion of the entropy.
    KeyDerivation,
    /// Obtaining the audio buffer from a capture collaborator.
    Capture,
    /// Hashing the audio buffer.
    AudioHash,
    /// Checksum and wordlist encoding.
    Encoding,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Entropy => "entropy",
            Stage::KeyDerivation => "key derivation",
            Stage::Capture => "audio capture",
            Stage::AudioHash => "audio hash",
            Stage::Encoding => "mnemonic encoding",
        };
        f.write_str(name)
    }
}

/// Error types for mnemonic derivation.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A parameter is outside its allowed set (bit size, buffer length, config).
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// The OS entropy source failed. Never replaced by a weaker generator.
    #[error("Entropy source unavailable: {reason}")]
    SourceUnavailable { reason: String },

    /// HKDF rejected the requested output.
    #[error("Key derivation failed: {0}")]
    DerivationError(String),

    /// The encoder was given a length BIP-39 does not define.
    #[error("Invalid entropy length: {len} bytes (expected 16, 20, 24, 28 or 32)")]
    InvalidEntropyLength { len: usize },

    /// An input that must carry data was empty.
    #[error("Empty input: {0}")]
    EmptyInput(&'static str),

    /// The audio capture collaborator failed.
    #[error("Audio capture failed: {0}")]
    Capture(String),

    /// Reading or writing a WAV file failed.
    #[error("WAV file error: {0}")]
    Wav(#[from] hound::Error),
}

impl Error {
    /// Stage of the pipeline this error aborted.
    pub fn stage(&self) -> Stage {
        match self {
            Error::InvalidParameter(_) | Error::SourceUnavailable { .. } => Stage::Entropy,
            Error::DerivationError(_) => Stage::KeyDerivation,
            Error::Capture(_) | Error::Wav(_) => Stage::Capture,
            Error::EmptyInput(_) => Stage::AudioHash,
            Error::InvalidEntropyLength { .. } => Stage::Encoding,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_stage_mapping() {
        assert_eq!(
            Error::SourceUnavailable {
                reason: "no device".into()
            }
            .stage(),
            Stage::Entropy
        );
        assert_eq!(Error::DerivationError("x".into()).stage(), Stage::KeyDerivation);
        assert_eq!(Error::EmptyInput("audio").stage(), Stage::AudioHash);
        assert_eq!(
            Error::InvalidEntropyLength { len: 31 }.stage(),
            Stage::Encoding
        );
        assert_eq!(Error::Capture("closed".into()).stage(), Stage::Capture);
    }

    #[test]
    fn test_error_messages() {
        let err = Error::InvalidEntropyLength { len: 31 };
        assert_eq!(
            err.to_string(),
            "Invalid entropy length: 31 bytes (expected 16, 20, 24, 28 or 32)"
        );
        assert_eq!(Stage::KeyDerivation.to_string(), "key derivation");
    }

    #[test]
    fn test_valid_lengths_map_to_bip39_sizes() {
        for len in VALID_ENTROPY_LENGTHS {
            assert_eq!(len % 4, 0);
            assert!((128..=256).contains(&(len * 8)));
        }
    }
}
