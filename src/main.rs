//! audio-entropy-bip39 - BIP-39 mnemonics from OS entropy and ambient audio
//!
//! This is the command-line entry point. It wires the capture collaborators
//! and file output around the library pipeline.

mod cli;
mod output;

use anyhow::{Context, Result};
use audio_entropy_bip39::{run, write_wav, AudioCapture, Transcript, WavFileSource};
use clap::Parser;
use log::info;

fn main() -> Result<()> {
    // Parse command-line arguments and initialize logging
    let args = cli::Args::parse();
    cli::init_logging(&args);

    info!("Starting audio-entropy-bip39");

    let config = args.capture_config();
    let mut source = capture_source(&args, &config)?;

    if !args.quiet {
        match &args.input {
            Some(path) => println!("Reading audio from {}...", path.display()),
            None => println!(
                "Recording for {}s. Speak into the microphone.",
                config.duration.as_secs()
            ),
        }
    }
    let (audio, derivation) = run(args.bits, source.as_mut(), config.duration).map_err(|e| {
        let stage = e.stage();
        anyhow::Error::new(e).context(format!("Derivation aborted during {}", stage))
    })?;

    if args.debug {
        println!("Entropy:       {}", derivation.entropy_hex().as_str());
        println!("Derived key:   {}", derivation.derived_key_hex().as_str());
        println!("Combined hash: {}", derivation.combined_digest_hex().as_str());
    }
    if !args.quiet {
        println!("Audio hash:    {}", derivation.audio_digest_hex());
    }

    output::display_mnemonic(derivation.mnemonic());

    if !args.no_save {
        if args.input.is_none() {
            write_wav(&args.audio_out, &audio).with_context(|| {
                format!("Failed to save audio to {}", args.audio_out.display())
            })?;
            info!("Saved audio to {}", args.audio_out.display());
        }
        output::save_mnemonic(&args.mnemonic_out, derivation.mnemonic())?;
        info!("Saved mnemonic to {}", args.mnemonic_out.display());
    }

    if let Some(path) = &args.transcript {
        output::save_transcript(path, &Transcript::seal(&derivation))?;
        info!("Saved transcript to {}", path.display());
    }

    Ok(())
}

/// Pick the audio source: a WAV file if given, otherwise the microphone.
fn capture_source(
    args: &cli::Args,
    config: &audio_entropy_bip39::CaptureConfig,
) -> Result<Box<dyn AudioCapture>> {
    if let Some(path) = &args.input {
        return Ok(Box::new(WavFileSource::new(path)));
    }

    #[cfg(feature = "capture")]
    {
        let mic = audio_entropy_bip39::MicrophoneCapture::new(config.clone()).with_meter(!args.quiet);
        Ok(Box::new(mic))
    }

    #[cfg(not(feature = "capture"))]
    {
        let _ = config;
        anyhow::bail!("built without microphone support; pass --input <WAV> or rebuild with --features capture")
    }
}
