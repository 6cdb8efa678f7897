//! The full derivation as a single forward pass.
//!
//! ```text
//! Entropy ──> derive_key ─────────────────────────────┐
//!    │                                                │
//!    └──> combine(entropy, hash_audio(audio)) ──> encode_mnemonic ──> Derivation
//! ```
//!
//! No stage is retried and no stage catches an error from an earlier one.

use std::time::Duration;

use zeroize::Zeroizing;

use crate::{
    combine, derive_default_key, encode_mnemonic, generate_entropy, hash_audio, AudioBuffer,
    AudioCapture, DerivedKey, Digest32, Entropy, Error, Mnemonic,
};

/// Every output of one derivation.
#[derive(Debug, Clone)]
pub struct Derivation {
    entropy: Entropy,
    derived_key: DerivedKey,
    audio_len: usize,
    audio_digest: Digest32,
    combined_digest: Digest32,
    mnemonic: Mnemonic,
}

impl Derivation {
    /// OS entropy that seeded the derivation.
    pub fn entropy(&self) -> &Entropy {
        &self.entropy
    }

    /// HKDF key derived from the entropy.
    pub fn derived_key(&self) -> &DerivedKey {
        &self.derived_key
    }

    /// Length of the hashed audio buffer in bytes.
    pub fn audio_len(&self) -> usize {
        self.audio_len
    }

    /// SHA-256 of the audio buffer.
    pub fn audio_digest(&self) -> &Digest32 {
        &self.audio_digest
    }

    /// SHA-256(entropy ‖ audio digest), the encoded value.
    pub fn combined_digest(&self) -> &Digest32 {
        &self.combined_digest
    }

    /// The resulting mnemonic.
    pub fn mnemonic(&self) -> &Mnemonic {
        &self.mnemonic
    }

    /// Entropy as lowercase hex.
    pub fn entropy_hex(&self) -> Zeroizing<String> {
        self.entropy.to_hex()
    }

    /// Derived key as lowercase hex.
    pub fn derived_key_hex(&self) -> Zeroizing<String> {
        self.derived_key.to_hex()
    }

    /// Audio digest as lowercase hex.
    pub fn audio_digest_hex(&self) -> String {
        hex::encode(self.audio_digest)
    }

    /// Combined digest as lowercase hex.
    pub fn combined_digest_hex(&self) -> Zeroizing<String> {
        Zeroizing::new(hex::encode(self.combined_digest))
    }
}

/// Derive a mnemonic from `entropy` and a serialized audio buffer.
///
/// # Errors
///
/// - [`Error::EmptyInput`] if `audio` is empty
/// - [`Error::DerivationError`] if HKDF fails
///
/// # Example
///
/// ```rust
/// use audio_entropy_bip39::{derive, Entropy};
///
/// let entropy = Entropy::from_bytes(&[0u8; 32]).unwrap();
/// let derivation = derive(&entropy, &[0u8; 100]).unwrap();
/// assert_eq!(derivation.mnemonic().word_count(), 24);
///
/// assert!(derive(&entropy, &[]).is_err());
/// ```
pub fn derive(entropy: &Entropy, audio: &[u8]) -> Result<Derivation, Error> {
    let derived_key = derive_default_key(entropy.as_bytes())?;
    let audio_digest = hash_audio(audio)?;
    let combined_digest = combine(entropy.as_bytes(), &audio_digest);
    let mnemonic = encode_mnemonic(&combined_digest)?;

    log::debug!(
        "derivation complete: {} entropy bits, {} audio bytes, {} words",
        entropy.bits(),
        audio.len(),
        mnemonic.word_count()
    );

    Ok(Derivation {
        entropy: entropy.clone(),
        derived_key,
        audio_len: audio.len(),
        audio_digest,
        combined_digest,
        mnemonic,
    })
}

/// Generate entropy, record audio and derive, in that order.
///
/// Entropy is drawn before recording starts so a failing OS generator aborts
/// the run before the microphone is opened. The recording is returned next to
/// the derivation so the caller can keep it.
pub fn run<C: AudioCapture + ?Sized>(
    bit_size: usize,
    capture: &mut C,
    duration: Duration,
) -> Result<(AudioBuffer, Derivation), Error> {
    let entropy = generate_entropy(bit_size)?;
    let audio = capture.capture(duration)?;
    log::info!(
        "captured {:.2}s of audio ({} bytes)",
        audio.duration().as_secs_f64(),
        audio.len() * 2
    );
    let derivation = derive(&entropy, &audio.to_bytes())?;
    Ok((audio, derivation))
}
