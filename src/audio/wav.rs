//! WAV file input and output using hound.
//!
//! Recordings are written as 16-bit PCM, which hound lays out with the
//! canonical 44-byte RIFF/WAVE header. Reading accepts any PCM or float WAV
//! and converts it to the 16-bit convention the pipeline hashes.

use std::path::{Path, PathBuf};
use std::time::Duration;

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};

use crate::{AudioBuffer, AudioCapture, Error};

/// Write `buffer` as a 16-bit PCM WAV file.
pub fn write_wav(path: impl AsRef<Path>, buffer: &AudioBuffer) -> Result<(), Error> {
    let spec = WavSpec {
        channels: buffer.channels(),
        sample_rate: buffer.sample_rate(),
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };

    let mut writer = WavWriter::create(path.as_ref(), spec)?;
    for &sample in buffer.samples() {
        writer.write_sample(sample)?;
    }
    writer.finalize()?;

    log::debug!(
        "wrote {} samples to {}",
        buffer.len(),
        path.as_ref().display()
    );
    Ok(())
}

/// Read a WAV file into a 16-bit PCM buffer.
///
/// Integer samples are rescaled to 16 bits; float samples go through
/// [`sample_to_i16`](crate::audio::sample_to_i16).
pub fn read_wav(path: impl AsRef<Path>) -> Result<AudioBuffer, Error> {
    let reader = WavReader::open(path.as_ref())?;
    let spec = reader.spec();

    let samples: Vec<i16> = match (spec.sample_format, spec.bits_per_sample) {
        (SampleFormat::Int, 16) => reader.into_samples::<i16>().collect::<Result<_, _>>()?,
        (SampleFormat::Int, bits) if bits < 16 => reader
            .into_samples::<i16>()
            .map(|s| s.map(|v| v << (16 - bits)))
            .collect::<Result<_, _>>()?,
        (SampleFormat::Int, bits) => reader
            .into_samples::<i32>()
            .map(|s| s.map(|v| (v >> (bits - 16)) as i16))
            .collect::<Result<_, _>>()?,
        (SampleFormat::Float, _) => {
            let floats: Vec<f32> = reader.into_samples::<f32>().collect::<Result<_, _>>()?;
            return Ok(AudioBuffer::from_f32(
                &floats,
                spec.sample_rate,
                spec.channels,
            ));
        }
    };

    Ok(AudioBuffer::new(samples, spec.sample_rate, spec.channels))
}

/// Audio source that replays a WAV file instead of a live device.
#[derive(Debug, Clone)]
pub struct WavFileSource {
    path: PathBuf,
}

impl WavFileSource {
    /// Read from `path` on each capture.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// File this source reads.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl AudioCapture for WavFileSource {
    fn capture(&mut self, duration: Duration) -> Result<AudioBuffer, Error> {
        let mut buffer = read_wav(&self.path)?;
        let available = buffer.duration();
        buffer.truncate_to(duration);

        if available < duration {
            log::warn!(
                "{} holds {:.2}s of audio, less than the requested {:.2}s",
                self.path.display(),
                available.as_secs_f64(),
                duration.as_secs_f64()
            );
        }
        log::info!(
            "loaded {} frames at {} Hz from {}",
            buffer.frames(),
            buffer.sample_rate(),
            self.path.display()
        );
        Ok(buffer)
    }
}
