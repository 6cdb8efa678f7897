//! Audio hashing and the entropy/audio mix.
//!
//! The audio buffer is reduced to a SHA-256 digest, which is then appended to
//! the OS entropy and hashed again:
//!
//! ```text
//! audio_digest = SHA-256(audio bytes)
//! combined     = SHA-256(entropy ‖ audio_digest)
//! ```
//!
//! The concatenation order is fixed: entropy first, audio digest second.

use sha2::{Digest, Sha256};

use crate::{Digest32, Error};

/// Hash a complete, serialized audio buffer.
///
/// # Errors
///
/// Returns [`Error::EmptyInput`] for an empty buffer instead of the digest of
/// zero bytes: an empty capture contributes nothing and must not pass silently.
pub fn hash_audio(samples: &[u8]) -> Result<Digest32, Error> {
    let mut hasher = AudioHasher::new();
    hasher.update(samples);
    hasher.finalize()
}

/// Mix entropy with an audio digest: `SHA-256(entropy ‖ audio_digest)`.
pub fn combine(entropy: &[u8], audio_digest: &Digest32) -> Digest32 {
    let mut hasher = Sha256::new();
    hasher.update(entropy);
    hasher.update(audio_digest);
    hasher.finalize().into()
}

/// Incremental audio hasher for capture backends that deliver chunks.
///
/// Chunks are hashed strictly in the order they are passed to
/// [`update`](AudioHasher::update). [`finalize`](AudioHasher::finalize)
/// consumes the hasher, so a digest only exists once the caller has declared
/// the stream complete; it equals [`hash_audio`] over the concatenated chunks.
#[derive(Clone, Default)]
pub struct AudioHasher {
    hasher: Sha256,
    len: u64,
}

impl std::fmt::Debug for AudioHasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AudioHasher").field("len", &self.len).finish()
    }
}

impl AudioHasher {
    /// Start an empty stream.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a chunk of serialized samples.
    pub fn update(&mut self, chunk: &[u8]) {
        self.hasher.update(chunk);
        self.len += chunk.len() as u64;
    }

    /// Bytes consumed so far.
    pub fn len(&self) -> u64 {
        self.len
    }

    /// Whether no bytes have been consumed.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Finish the stream and return its digest.
    pub fn finalize(self) -> Result<Digest32, Error> {
        if self.len == 0 {
            return Err(Error::EmptyInput("audio buffer"));
        }
        let digest: Digest32 = self.hasher.finalize().into();
        log::debug!(
            "hashed {} audio bytes: {}",
            self.len,
            hex::encode(digest)
        );
        Ok(digest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_audio_known_value() {
        // FIPS 180-2 "abc" vector
        let digest = hash_audio(b"abc").unwrap();
        assert_eq!(
            hex::encode(digest),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_hash_audio_deterministic() {
        let buffer: Vec<u8> = (0..=255u8).cycle().take(4410 * 2).collect();
        assert_eq!(hash_audio(&buffer).unwrap(), hash_audio(&buffer).unwrap());
    }

    #[test]
    fn test_hash_audio_order_sensitive() {
        let first = [0x11u8; 64];
        let second = [0x22u8; 64];

        let forward: Vec<u8> = first.iter().chain(second.iter()).copied().collect();
        let swapped: Vec<u8> = second.iter().chain(first.iter()).copied().collect();

        assert_ne!(hash_audio(&forward).unwrap(), hash_audio(&swapped).unwrap());
    }

    #[test]
    fn test_hash_audio_empty_rejected() {
        assert!(matches!(hash_audio(&[]), Err(Error::EmptyInput(_))));
    }

    #[test]
    fn test_combine_order_sensitive() {
        let e = [0xAAu8; 32];
        let d = [0x55u8; 32];
        assert_ne!(combine(&e, &d), combine(&d, &e));
    }

    #[test]
    fn test_combine_is_hash_of_concatenation() {
        let entropy = [3u8; 32];
        let digest = [4u8; 32];

        let mut concatenated = entropy.to_vec();
        concatenated.extend_from_slice(&digest);
        let expected: Digest32 = Sha256::digest(&concatenated).into();

        assert_eq!(combine(&entropy, &digest), expected);
    }

    #[test]
    fn test_combine_short_entropy() {
        // 128-bit entropy is still mixed in full.
        let digest = [9u8; 32];
        assert_ne!(combine(&[1u8; 16], &digest), combine(&[1u8; 32], &digest));
    }

    #[test]
    fn test_incremental_matches_one_shot() {
        let buffer: Vec<u8> = (0..1000u32).map(|i| (i * 7 % 251) as u8).collect();

        let mut hasher = AudioHasher::new();
        for chunk in buffer.chunks(97) {
            hasher.update(chunk);
        }
        assert_eq!(hasher.len(), 1000);

        assert_eq!(hasher.finalize().unwrap(), hash_audio(&buffer).unwrap());
    }

    #[test]
    fn test_incremental_empty_chunks_rejected() {
        let mut hasher = AudioHasher::new();
        hasher.update(&[]);
        hasher.update(&[]);
        assert!(hasher.is_empty());
        assert!(matches!(hasher.finalize(), Err(Error::EmptyInput(_))));
    }
}
