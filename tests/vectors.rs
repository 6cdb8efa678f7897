//! Known-answer tests for the encoder and the full derivation.
//!
//! Encoder vectors are the published BIP-39 English vectors. The fixed
//! derivation is pinned to literal digests and a literal phrase, then
//! recomputed with the `bip39` crate fed by a separate SHA-256 chain.

use audio_entropy_bip39::{
    combine, derive, derive_key, encode_mnemonic, hash_audio, AudioBuffer, Entropy, Error, Stage,
};
use sha2::{Digest, Sha256};

fn repeat(word: &str, n: usize, last: &str) -> String {
    let mut words = vec![word; n];
    words.push(last);
    words.join(" ")
}

fn assert_vector(entropy_hex: &str, expected: &str) {
    let entropy = hex::decode(entropy_hex).unwrap();
    let mnemonic = encode_mnemonic(&entropy).unwrap();
    assert_eq!(mnemonic.to_string(), expected, "entropy {}", entropy_hex);
}

#[test]
fn test_bip39_vectors_128() {
    assert_vector(&"00".repeat(16), &repeat("abandon", 11, "about"));
    assert_vector(
        &"7f".repeat(16),
        "legal winner thank year wave sausage worth useful legal winner thank yellow",
    );
    assert_vector(
        &"80".repeat(16),
        "letter advice cage absurd amount doctor acoustic avoid letter advice cage above",
    );
    assert_vector(&"ff".repeat(16), &repeat("zoo", 11, "wrong"));
    assert_vector(
        "9e885d952ad362caeb4efe34a8e91bd2",
        "ozone drill grab fiber curtain grace pudding thank cruise elder eight picnic",
    );
}

#[test]
fn test_bip39_vectors_192() {
    assert_vector(&"00".repeat(24), &repeat("abandon", 17, "agent"));
    assert_vector(&"ff".repeat(24), &repeat("zoo", 17, "when"));
    assert_vector(
        "6610b25967cdcca9d59875f5cb50b0ea75433311869e930b",
        "gravity machine north sort system female filter attitude volume fold club stay \
         feature office ecology stable narrow fog",
    );
}

#[test]
fn test_bip39_vectors_256() {
    assert_vector(&"00".repeat(32), &repeat("abandon", 23, "art"));
    assert_vector(
        &"7f".repeat(32),
        "legal winner thank year wave sausage worth useful legal winner thank year wave \
         sausage worth useful legal winner thank year wave sausage worth title",
    );
    assert_vector(
        &"80".repeat(32),
        "letter advice cage absurd amount doctor acoustic avoid letter advice cage absurd \
         amount doctor acoustic avoid letter advice cage absurd amount doctor acoustic bless",
    );
    assert_vector(&"ff".repeat(32), &repeat("zoo", 23, "vote"));
    assert_vector(
        "68a79eaca2324873eacc50cb9c6eca8cc68ea5d936f98787c60c7ebc74e6ce7c",
        "hamster diagram private dutch cause delay private meat slide toddler razor book \
         happy fancy gospel tennis maple dilemma loan word shrug inflict delay length",
    );
}

#[test]
fn test_every_length_matches_reference() {
    for len in [16usize, 20, 24, 28, 32] {
        let entropy: Vec<u8> = (0..len as u8).map(|i| i.wrapping_mul(37) ^ 0xa5).collect();
        let ours = encode_mnemonic(&entropy).unwrap();
        let reference = bip39::Mnemonic::from_entropy(&entropy).unwrap();
        assert_eq!(ours.to_string(), reference.to_string());
        assert_eq!(ours.word_count(), len * 3 / 4);
    }
}

#[test]
fn test_end_to_end_fixed_inputs() {
    let entropy_bytes: [u8; 32] = [
        0x0c, 0x1e, 0x24, 0xe5, 0x91, 0x77, 0x79, 0xd2, 0x97, 0xe1, 0x4d, 0x45, 0xf1, 0x4e,
        0x1a, 0x1a, 0x8a, 0x8e, 0x5b, 0x4f, 0x3c, 0x2b, 0x60, 0x0d, 0x18, 0xe9, 0xa0, 0x4c,
        0x7b, 0x21, 0x3f, 0x99,
    ];
    let audio = [0u8; 100];

    let entropy = Entropy::from_bytes(&entropy_bytes).unwrap();
    let derivation = derive(&entropy, &audio).unwrap();

    // Pinned values.
    assert_eq!(
        derivation.audio_digest_hex(),
        "cd00e292c5970d3c5e2f0ffa5171e555bc46bfc4faddfb4a418b6840b86e79a3"
    );
    assert_eq!(
        derivation.combined_digest_hex().as_str(),
        "6216e6f0e478d43194ae21c8f85a876110043b2daa52e0bad23f154d59359e31"
    );
    assert_eq!(
        derivation.mnemonic().to_string(),
        "ginger rescue rotate similar minute boat famous service similar security peace \
         season able budget repeat engage thing story more clever stereo onion juice cube"
    );

    // Independent recomputation with the reference crates.
    let audio_digest: [u8; 32] = Sha256::digest(audio).into();
    let mut hasher = Sha256::new();
    hasher.update(entropy_bytes);
    hasher.update(audio_digest);
    let combined: [u8; 32] = hasher.finalize().into();
    let expected = bip39::Mnemonic::from_entropy(&combined).unwrap();

    assert_eq!(derivation.audio_digest(), &audio_digest);
    assert_eq!(derivation.combined_digest(), &combined);
    assert_eq!(derivation.mnemonic().to_string(), expected.to_string());
    assert_eq!(derivation.mnemonic().word_count(), 24);

    // Same inputs, same phrase.
    let again = derive(&entropy, &audio).unwrap();
    assert_eq!(again.mnemonic(), derivation.mnemonic());
}

#[test]
fn test_stages_compose_like_derive() {
    let entropy = Entropy::from_bytes(&[7u8; 32]).unwrap();
    let audio = AudioBuffer::from_f32(&[0.5, -0.5, 1.0, -1.0, 0.0], 44_100, 1).to_bytes();
    assert_eq!(audio.len(), 10);

    let digest = hash_audio(&audio).unwrap();
    let mixed = combine(entropy.as_bytes(), &digest);
    let manual = encode_mnemonic(&mixed).unwrap();

    let derivation = derive(&entropy, &audio).unwrap();
    assert_eq!(derivation.mnemonic(), &manual);
    assert_eq!(
        derivation.derived_key().as_bytes(),
        derive_key(entropy.as_bytes(), 32).unwrap().as_bytes()
    );
}

#[test]
fn test_empty_audio_aborts() {
    let entropy = Entropy::from_bytes(&[1u8; 32]).unwrap();
    let err = derive(&entropy, &[]).unwrap_err();
    assert!(matches!(err, Error::EmptyInput(_)));
    assert_eq!(err.stage(), Stage::AudioHash);
}

#[test]
fn test_unsupported_lengths_rejected() {
    for len in [0usize, 1, 15, 17, 31, 33, 64] {
        let err = encode_mnemonic(&vec![0u8; len]).unwrap_err();
        assert!(
            matches!(err, Error::InvalidEntropyLength { len: l } if l == len),
            "length {}",
            len
        );
    }
}

#[test]
fn test_audio_convention_bytes() {
    let buffer = AudioBuffer::from_f32(&[1.0, -1.0, 0.5, 2.0, f32::NAN], 8_000, 1);
    assert_eq!(buffer.samples(), &[32767, -32767, 16383, 32767, 0]);
    assert_eq!(
        buffer.to_bytes(),
        vec![0xff, 0x7f, 0x01, 0x80, 0xff, 0x3f, 0xff, 0x7f, 0x00, 0x00]
    );
}
