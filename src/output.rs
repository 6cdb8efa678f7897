//! Terminal display and file output for the binary.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use audio_entropy_bip39::{Mnemonic, Transcript};

/// Print the mnemonic in numbered groups of four words.
pub fn display_mnemonic(mnemonic: &Mnemonic) {
    println!();
    println!("============================================================");
    println!("                    IMPORTANT - SAVE THIS!");
    println!("============================================================");
    println!();
    println!("Your {}-word mnemonic:", mnemonic.word_count());
    println!();

    let words: Vec<&str> = mnemonic.words().collect();
    for (i, chunk) in words.chunks(4).enumerate() {
        let start_num = i * 4 + 1;
        let formatted: Vec<String> = chunk
            .iter()
            .enumerate()
            .map(|(j, word)| format!("{:2}. {:<12}", start_num + j, word))
            .collect();
        println!("  {}", formatted.join("  "));
    }

    println!();
    println!("============================================================");
    println!("  Anyone with this phrase controls the wallet it seeds.");
    println!("  Store it offline and delete the saved copy once written down.");
    println!("============================================================");
    println!();
}

/// Write the mnemonic as a single line, readable only by the owner on Unix.
pub fn save_mnemonic(path: &Path, mnemonic: &Mnemonic) -> Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options
        .open(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    // The creation mode does not apply when an existing file is reused.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(fs::Permissions::from_mode(0o600))
            .with_context(|| format!("Failed to restrict permissions on {}", path.display()))?;
    }
    writeln!(file, "{}", mnemonic.phrase().as_str())
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

/// Write a sealed transcript as pretty JSON.
pub fn save_transcript(path: &Path, transcript: &Transcript) -> Result<()> {
    let json = transcript
        .to_json()
        .context("Failed to serialize transcript")?;
    fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use audio_entropy_bip39::encode_mnemonic;

    #[test]
    fn test_save_mnemonic_single_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mnemonic.txt");
        let mnemonic = encode_mnemonic(&[0u8; 32]).unwrap();

        save_mnemonic(&path, &mnemonic).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents, format!("{}\n", mnemonic));
        assert_eq!(contents.split_whitespace().count(), 24);
    }

    #[cfg(unix)]
    #[test]
    fn test_save_mnemonic_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mnemonic.txt");
        save_mnemonic(&path, &encode_mnemonic(&[1u8; 16]).unwrap()).unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[cfg(unix)]
    #[test]
    fn test_save_mnemonic_restricts_existing_file() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mnemonic.txt");
        fs::write(&path, "old contents that are much longer than nothing\n").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();

        let mnemonic = encode_mnemonic(&[2u8; 16]).unwrap();
        save_mnemonic(&path, &mnemonic).unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
        assert_eq!(fs::read_to_string(&path).unwrap(), format!("{}\n", mnemonic));
    }
}
