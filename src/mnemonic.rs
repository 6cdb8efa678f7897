//! BIP-39 mnemonic encoding.
//!
//! Encoding appends a checksum to the entropy and reads the result as a
//! sequence of 11-bit word indices:
//!
//! ```text
//! ENT  = entropy length in bits (128..=256, multiple of 32)
//! CS   = ENT / 32 leading bits of SHA-256(entropy)
//! MS   = (ENT + CS) / 11 words
//! ```
//!
//! | ENT | CS | words |
//! |-----|----|-------|
//! | 128 | 4  | 12    |
//! | 160 | 5  | 15    |
//! | 192 | 6  | 18    |
//! | 224 | 7  | 21    |
//! | 256 | 8  | 24    |
//!
//! Word order carries the checksum positionally; the phrase is only
//! recoverable by a wallet if the groups stay in index order.

use std::fmt;

use bip39::Language;
use sha2::{Digest, Sha256};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::{Error, VALID_ENTROPY_LENGTHS};

/// Bits per word index.
const BITS_PER_WORD: usize = 11;

/// Mask selecting one word index.
const WORD_MASK: u32 = (1 << BITS_PER_WORD) - 1;

/// The canonical 2048-word English list.
fn wordlist() -> &'static [&'static str; 2048] {
    Language::English.word_list()
}

/// An encoded BIP-39 mnemonic.
///
/// Holds the word indices only; words are looked up from the canonical
/// English list on demand. Indices are zeroized on drop and the `Debug`
/// output never includes the phrase.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Mnemonic {
    indices: Vec<u16>,
}

impl Mnemonic {
    /// Number of words (12, 15, 18, 21 or 24).
    pub fn word_count(&self) -> usize {
        self.indices.len()
    }

    /// Word indices into the English list, in phrase order.
    pub fn indices(&self) -> &[u16] {
        &self.indices
    }

    /// Words in phrase order.
    pub fn words(&self) -> impl Iterator<Item = &'static str> + '_ {
        let list = wordlist();
        self.indices.iter().map(move |&i| list[i as usize])
    }

    /// The phrase as a single-space separated string.
    ///
    /// The returned buffer is zeroized when dropped.
    pub fn phrase(&self) -> Zeroizing<String> {
        let mut phrase = String::with_capacity(self.indices.len() * 9);
        for (i, word) in self.words().enumerate() {
            if i > 0 {
                phrase.push(' ');
            }
            phrase.push_str(word);
        }
        Zeroizing::new(phrase)
    }

    /// Entropy bits this mnemonic encodes.
    pub fn entropy_bits(&self) -> usize {
        // word_count * 11 = ENT + ENT/32 = ENT * 33/32
        self.indices.len() * BITS_PER_WORD * 32 / 33
    }
}

impl fmt::Display for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, word) in self.words().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            f.write_str(word)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mnemonic")
            .field("word_count", &self.word_count())
            .field("phrase", &"[REDACTED]")
            .finish()
    }
}

/// Number of checksum bits for `len` bytes of entropy.
pub fn checksum_bits(len: usize) -> usize {
    len * 8 / 32
}

/// Encode entropy as a BIP-39 mnemonic.
///
/// # Errors
///
/// Returns [`Error::InvalidEntropyLength`] unless `entropy` is 16, 20, 24, 28
/// or 32 bytes long.
///
/// # Example
///
/// ```rust
/// use audio_entropy_bip39::encode_mnemonic;
///
/// let mnemonic = encode_mnemonic(&[0u8; 16]).unwrap();
/// assert_eq!(
///     mnemonic.to_string(),
///     "abandon abandon abandon abandon abandon abandon \
///      abandon abandon abandon abandon abandon about"
/// );
/// ```
pub fn encode_mnemonic(entropy: &[u8]) -> Result<Mnemonic, Error> {
    if !VALID_ENTROPY_LENGTHS.contains(&entropy.len()) {
        return Err(Error::InvalidEntropyLength { len: entropy.len() });
    }

    let cs_bits = checksum_bits(entropy.len());
    let word_count = (entropy.len() * 8 + cs_bits) / BITS_PER_WORD;

    // At most 8 checksum bits, so the first checksum byte is all that is read.
    let checksum = Sha256::digest(entropy);

    let mut indices = Vec::with_capacity(word_count);
    let mut acc = Zeroizing::new(0u32);
    let mut acc_bits = 0usize;

    for &byte in entropy.iter().chain(std::iter::once(&checksum[0])) {
        *acc = (*acc << 8) | u32::from(byte);
        acc_bits += 8;
        while acc_bits >= BITS_PER_WORD && indices.len() < word_count {
            acc_bits -= BITS_PER_WORD;
            indices.push(((*acc >> acc_bits) & WORD_MASK) as u16);
        }
        // Keep only the bits not yet emitted.
        *acc &= (1u32 << acc_bits) - 1;
    }

    debug_assert_eq!(indices.len(), word_count);
    log::debug!(
        "encoded {} bits of entropy with {} checksum bits into {} words",
        entropy.len() * 8,
        cs_bits,
        word_count
    );

    Ok(Mnemonic { indices })
}
