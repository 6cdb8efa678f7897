//! OS-backed entropy generation.
//!
//! Entropy is always drawn from the operating system CSPRNG via `getrandom`.
//! There is no seedable generator anywhere in this module, and no fallback:
//! if the OS call fails the error is returned to the caller.

use std::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::{EntropySource, Error, VALID_ENTROPY_LENGTHS};

/// Entropy source backed by the operating system generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsEntropy;

impl EntropySource for OsEntropy {
    fn fill(&self, dest: &mut [u8]) -> Result<(), Error> {
        getrandom::fill(dest).map_err(|e| Error::SourceUnavailable {
            reason: e.to_string(),
        })
    }
}

/// Random bytes of a BIP-39 compatible length, zeroized on drop.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Entropy {
    bytes: Vec<u8>,
}

impl Entropy {
    /// Wrap caller-supplied bytes, checking the length is one BIP-39 accepts.
    ///
    /// Intended for fixed test vectors and replays of a recorded derivation;
    /// fresh entropy should come from [`generate_entropy`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        if !VALID_ENTROPY_LENGTHS.contains(&bytes.len()) {
            return Err(Error::InvalidParameter(format!(
                "entropy must be 16, 20, 24, 28 or 32 bytes, got {}",
                bytes.len()
            )));
        }
        Ok(Self {
            bytes: bytes.to_vec(),
        })
    }

    /// Raw entropy bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Length in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Always false: entropy has a validated, non-zero length.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Length in bits.
    pub fn bits(&self) -> usize {
        self.bytes.len() * 8
    }

    /// Lowercase hex encoding, for display.
    pub fn to_hex(&self) -> zeroize::Zeroizing<String> {
        zeroize::Zeroizing::new(hex::encode(&self.bytes))
    }
}

impl AsRef<[u8]> for Entropy {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl fmt::Debug for Entropy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entropy")
            .field("bits", &self.bits())
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}

/// Generate `bit_size` bits of entropy from the OS generator.
///
/// `bit_size` must be 128, 160, 192, 224 or 256.
///
/// # Example
///
/// ```rust
/// use audio_entropy_bip39::generate_entropy;
///
/// let entropy = generate_entropy(256).unwrap();
/// assert_eq!(entropy.len(), 32);
///
/// assert!(generate_entropy(100).is_err());
/// ```
pub fn generate_entropy(bit_size: usize) -> Result<Entropy, Error> {
    generate_entropy_from(&OsEntropy, bit_size)
}

/// Generate `bit_size` bits of entropy from an explicit source.
pub fn generate_entropy_from<S: EntropySource + ?Sized>(
    source: &S,
    bit_size: usize,
) -> Result<Entropy, Error> {
    if bit_size % 8 != 0 || !VALID_ENTROPY_LENGTHS.contains(&(bit_size / 8)) {
        return Err(Error::InvalidParameter(format!(
            "bit size must be 128, 160, 192, 224 or 256, got {}",
            bit_size
        )));
    }

    let mut entropy = Entropy {
        bytes: vec![0u8; bit_size / 8],
    };
    // `entropy` is zeroized on drop if the source fails part way through.
    source.fill(&mut entropy.bytes)?;

    log::debug!("drew {} bits of entropy from the OS generator", bit_size);
    Ok(entropy)
}
