//! Serializable record of a derivation.
//!
//! A [`Transcript`] keeps only values that are safe to store next to the
//! recording: entropy size, audio length and digest, word count and a
//! timestamp. It never contains the entropy, the derived key, the combined
//! digest or the words. The record is sealed with HMAC-SHA256 keyed by the
//! derived key, and the tag also covers the combined digest, so whoever holds
//! the entropy and the recording can later confirm both produced this
//! mnemonic.

use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

use crate::{derive, Derivation, Digest32, Entropy};

type HmacSha256 = Hmac<Sha256>;

/// Current transcript format version.
pub const TRANSCRIPT_VERSION: u8 = 1;

/// Sealed summary of one derivation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transcript {
    /// Version of the transcript format.
    pub version: u8,
    /// Size of the OS entropy in bits.
    pub entropy_bits: usize,
    /// Length of the hashed audio buffer in bytes.
    pub audio_len: usize,
    /// SHA-256 of the audio buffer.
    pub audio_digest: Digest32,
    /// Number of words in the mnemonic.
    pub word_count: usize,
    /// Time of derivation (Unix micros).
    pub timestamp_us: u64,
    /// HMAC-SHA256 over the fields above and the combined digest.
    pub tag: [u8; 32],
}

impl Transcript {
    /// Seal a derivation, stamped with the current time.
    pub fn seal(derivation: &Derivation) -> Self {
        Self::seal_with_timestamp(derivation, current_timestamp_us())
    }

    /// Seal a derivation with an explicit timestamp.
    pub fn seal_with_timestamp(derivation: &Derivation, timestamp_us: u64) -> Self {
        let mut transcript = Self {
            version: TRANSCRIPT_VERSION,
            entropy_bits: derivation.entropy().bits(),
            audio_len: derivation.audio_len(),
            audio_digest: *derivation.audio_digest(),
            word_count: derivation.mnemonic().word_count(),
            timestamp_us,
            tag: [0u8; 32],
        };
        transcript.tag = transcript.compute_tag(derivation);
        transcript
    }

    /// Update HMAC with the canonical binary form of the transcript fields.
    fn hash_into_mac(&self, mac: &mut HmacSha256) {
        mac.update(b"audio-entropy-bip39/v1/transcript"); // Domain separation
        mac.update(&[self.version]);
        mac.update(&(self.entropy_bits as u64).to_le_bytes());
        mac.update(&(self.audio_len as u64).to_le_bytes());
        mac.update(&self.audio_digest);
        mac.update(&(self.word_count as u64).to_le_bytes());
        mac.update(&self.timestamp_us.to_le_bytes());
    }

    fn keyed_mac(&self, derivation: &Derivation) -> HmacSha256 {
        let mut mac = HmacSha256::new_from_slice(derivation.derived_key().as_bytes())
            .expect("HMAC accepts any key size");
        self.hash_into_mac(&mut mac);
        mac.update(derivation.combined_digest());
        mac
    }

    fn compute_tag(&self, derivation: &Derivation) -> [u8; 32] {
        self.keyed_mac(derivation).finalize().into_bytes().into()
    }

    /// Re-run the derivation and check it reproduces this transcript.
    ///
    /// Returns false if the entropy or audio differ from the sealed ones, if
    /// any field was modified, or if the derivation itself fails. The tag is
    /// compared in constant time.
    pub fn verify(&self, entropy: &Entropy, audio: &[u8]) -> bool {
        use subtle::ConstantTimeEq;

        let derivation = match derive(entropy, audio) {
            Ok(derivation) => derivation,
            Err(_) => return false,
        };

        let fields_match = self.version == TRANSCRIPT_VERSION
            && self.entropy_bits == derivation.entropy().bits()
            && self.audio_len == derivation.audio_len()
            && self.word_count == derivation.mnemonic().word_count()
            && bool::from(self.audio_digest.ct_eq(derivation.audio_digest()));

        fields_match && self.keyed_mac(&derivation).verify_slice(&self.tag).is_ok()
    }

    /// Export as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Parse from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Get current timestamp in microseconds.
fn current_timestamp_us() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_micros() as u64)
        .unwrap_or(0)
}
