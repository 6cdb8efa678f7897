//! One-shot HKDF-SHA256 key derivation.
//!
//! The entropy is used directly as input keying material, with no salt and an
//! empty info string. That is weaker than recommended HKDF usage; the derived
//! key is only shown for diagnostics and keys the derivation [`Transcript`],
//! it never feeds the mnemonic.
//!
//! [`Transcript`]: crate::Transcript

use std::fmt;

use hkdf::Hkdf;
use sha2::Sha256;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::Error;

/// Default derived key length in bytes.
pub const DERIVED_KEY_LEN: usize = 32;

/// Largest output HKDF-SHA256 can expand to (255 blocks of 32 bytes).
pub const MAX_DERIVED_KEY_LEN: usize = 255 * 32;

/// Key material produced by [`derive_key`], zeroized on drop.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct DerivedKey {
    bytes: Vec<u8>,
}

impl DerivedKey {
    /// Raw key bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Key length in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the key is empty. Never true for keys from [`derive_key`].
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Lowercase hex encoding, for display.
    pub fn to_hex(&self) -> Zeroizing<String> {
        Zeroizing::new(hex::encode(&self.bytes))
    }
}

impl AsRef<[u8]> for DerivedKey {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DerivedKey")
            .field("len", &self.len())
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}

/// Expand `entropy` into `key_len` bytes with HKDF-SHA256 (no salt, no info).
///
/// # Errors
///
/// Returns [`Error::DerivationError`] if `key_len` is zero or larger than
/// [`MAX_DERIVED_KEY_LEN`].
///
/// # Example
///
/// ```rust
/// use audio_entropy_bip39::derive_key;
///
/// let key = derive_key(&[7u8; 32], 32).unwrap();
/// assert_eq!(key, derive_key(&[7u8; 32], 32).unwrap());
/// ```
pub fn derive_key(entropy: &[u8], key_len: usize) -> Result<DerivedKey, Error> {
    if key_len == 0 || key_len > MAX_DERIVED_KEY_LEN {
        return Err(Error::DerivationError(format!(
            "output length must be 1..={} bytes, got {}",
            MAX_DERIVED_KEY_LEN, key_len
        )));
    }

    let hk = Hkdf::<Sha256>::new(None, entropy);
    let mut key = DerivedKey {
        bytes: vec![0u8; key_len],
    };
    hk.expand(&[], &mut key.bytes)
        .map_err(|e| Error::DerivationError(e.to_string()))?;

    log::debug!("derived {}-byte key with HKDF-SHA256", key_len);
    Ok(key)
}

/// Derive the default 32-byte key.
pub fn derive_default_key(entropy: &[u8]) -> Result<DerivedKey, Error> {
    derive_key(entropy, DERIVED_KEY_LEN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hmac::{Hmac, Mac};

    type HmacSha256 = Hmac<Sha256>;

    #[test]
    fn test_rfc5869_case3_no_salt_no_info() {
        // RFC 5869 A.3: SHA-256 with zero-length salt and info.
        let ikm = [0x0bu8; 22];
        let okm = derive_key(&ikm, 42).unwrap();
        assert_eq!(
            hex::encode(okm.as_bytes()),
            "8da4e775a563c18f715f802a063c5a31b8a11f5c5ee1879ec3454e5f3c738d2d\
             9d201395faa4b61a96c8"
        );
    }

    #[test]
    fn test_matches_manual_extract_expand() {
        let entropy = [0x5au8; 32];

        // Extract: PRK = HMAC(salt = 32 zero bytes, IKM)
        let mut mac = HmacSha256::new_from_slice(&[0u8; 32]).unwrap();
        mac.update(&entropy);
        let prk = mac.finalize().into_bytes();

        // Expand, single block: T(1) = HMAC(PRK, info ‖ 0x01)
        let mut mac = HmacSha256::new_from_slice(&prk).unwrap();
        mac.update(&[0x01]);
        let t1 = mac.finalize().into_bytes();

        let key = derive_default_key(&entropy).unwrap();
        assert_eq!(key.as_bytes(), t1.as_slice());
    }

    #[test]
    fn test_deterministic() {
        let entropy = [42u8; 32];
        let k1 = derive_default_key(&entropy).unwrap();
        let k2 = derive_default_key(&entropy).unwrap();
        assert_eq!(k1, k2);
        assert_eq!(k1.len(), DERIVED_KEY_LEN);
    }

    #[test]
    fn test_different_entropy_different_key() {
        let k1 = derive_default_key(&[1u8; 32]).unwrap();
        let k2 = derive_default_key(&[2u8; 32]).unwrap();
        assert_ne!(k1, k2);
    }

    #[test]
    fn test_length_limits() {
        assert!(derive_key(&[1u8; 16], MAX_DERIVED_KEY_LEN).is_ok());
        assert!(matches!(
            derive_key(&[1u8; 16], MAX_DERIVED_KEY_LEN + 1),
            Err(Error::DerivationError(_))
        ));
        assert!(matches!(
            derive_key(&[1u8; 16], 0),
            Err(Error::DerivationError(_))
        ));
    }

    #[test]
    fn test_prefix_property() {
        // HKDF output blocks are independent of the requested length.
        let short = derive_key(&[9u8; 32], 16).unwrap();
        let long = derive_key(&[9u8; 32], 64).unwrap();
        assert_eq!(short.as_bytes(), &long.as_bytes()[..16]);
    }
}
