//! Command-line interface for audio-entropy-bip39
//!
//! Handles argument parsing and logging configuration.

use std::path::PathBuf;
use std::time::Duration;

use audio_entropy_bip39::CaptureConfig;
use clap::Parser;
use log::LevelFilter;

/// Generate a BIP-39 mnemonic from OS entropy mixed with ambient audio
#[derive(Parser, Debug)]
#[command(name = "audio-entropy-bip39")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Entropy size in bits: 128, 160, 192, 224 or 256
    #[arg(short, long, default_value_t = 256, value_parser = parse_bits)]
    pub bits: usize,

    /// Recording duration in seconds (at most one hour)
    #[arg(short, long, default_value_t = 15, value_parser = clap::value_parser!(u64).range(1..=3_600))]
    pub duration: u64,

    /// Capture sample rate in Hz
    #[arg(long, default_value_t = 44_100, value_parser = clap::value_parser!(u32).range(1..=384_000))]
    pub sample_rate: u32,

    /// Read audio from a WAV file instead of the microphone
    #[arg(short, long, value_name = "WAV")]
    pub input: Option<PathBuf>,

    /// Where to save the recorded audio
    #[arg(long, value_name = "WAV", default_value = "audio-data.wav")]
    pub audio_out: PathBuf,

    /// Where to save the mnemonic
    #[arg(long, value_name = "FILE", default_value = "mnemonic.txt")]
    pub mnemonic_out: PathBuf,

    /// Also write a sealed JSON transcript of the derivation
    #[arg(long, value_name = "JSON")]
    pub transcript: Option<PathBuf>,

    /// Do not write the audio or mnemonic files
    #[arg(long)]
    pub no_save: bool,

    /// Print entropy, derived key and intermediate digests
    #[arg(long)]
    pub debug: bool,

    /// Increase logging verbosity
    /// -v = info, -vv = debug, -vvv = trace, -vvvv = all deps
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors and the mnemonic
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    /// Get the log level filter based on verbosity flags
    pub fn log_level(&self) -> LevelFilter {
        if self.quiet {
            LevelFilter::Error
        } else {
            match self.verbose {
                0 => LevelFilter::Warn,
                1 => LevelFilter::Info,
                2 => LevelFilter::Debug,
                _ => LevelFilter::Trace,
            }
        }
    }

    /// Capture settings derived from the flags
    pub fn capture_config(&self) -> CaptureConfig {
        CaptureConfig::default()
            .with_sample_rate(self.sample_rate)
            .with_duration(Duration::from_secs(self.duration))
    }
}

fn parse_bits(s: &str) -> Result<usize, String> {
    let bits: usize = s
        .parse()
        .map_err(|_| format!("`{}` is not a number", s))?;
    match bits {
        128 | 160 | 192 | 224 | 256 => Ok(bits),
        _ => Err(format!(
            "{} is not a BIP-39 entropy size (use 128, 160, 192, 224 or 256)",
            bits
        )),
    }
}

/// Initialize the logging system based on CLI arguments
pub fn init_logging(args: &Args) {
    let mut builder = env_logger::Builder::new();

    // Base level for all modules - keep at warn to suppress noisy deps
    builder.filter_level(LevelFilter::Warn);

    // Set our modules to requested verbosity level
    builder.filter_module("audio_entropy_bip39", args.log_level());

    // Audio host internals only at -vvvv (very verbose)
    if args.verbose >= 4 {
        builder.filter_module("cpal", args.log_level());
        builder.filter_module("hound", args.log_level());
    }

    builder.format_timestamp_millis().init();
}
