//! Microphone capture using cpal.
//!
//! Records from the default input device at the configured sample rate,
//! down-mixes to mono and redraws a volume meter on stderr while recording.
//! The pipeline only receives the buffer after the stream has been dropped.

use std::io;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Device, Sample, SampleFormat, SizedSample, StreamConfig, SupportedStreamConfig};

use super::{rms_volume, AudioBuffer, CaptureConfig, VolumeMeter};
use crate::{AudioCapture, Error};

/// State shared with the device callback.
#[derive(Default)]
struct Recording {
    samples: Vec<f32>,
    level: f32,
    error: Option<String>,
}

/// Capture from the default microphone.
#[derive(Debug, Clone)]
pub struct MicrophoneCapture {
    config: CaptureConfig,
    meter: Option<VolumeMeter>,
}

impl MicrophoneCapture {
    /// Create a capture for `config`, metering enabled.
    pub fn new(config: CaptureConfig) -> Self {
        let meter = Some(VolumeMeter::new(config.meter_width));
        Self { config, meter }
    }

    /// Enable or disable the stderr volume meter.
    pub fn with_meter(mut self, enabled: bool) -> Self {
        self.meter = enabled.then(|| VolumeMeter::new(self.config.meter_width));
        self
    }

    /// Configuration in use.
    pub fn config(&self) -> &CaptureConfig {
        &self.config
    }

    fn open_device(&self) -> Result<(Device, SupportedStreamConfig), Error> {
        let host = cpal::default_host();
        let device = host
            .default_input_device()
            .ok_or_else(|| Error::Capture("no default input device".into()))?;

        let rate = cpal::SampleRate(self.config.sample_rate);
        let supported = device
            .supported_input_configs()
            .map_err(|e| Error::Capture(format!("cannot query input configs: {}", e)))?
            .filter(|range| is_handled_format(range.sample_format()))
            .filter(|range| range.min_sample_rate() <= rate && rate <= range.max_sample_rate())
            .min_by_key(|range| range.channels())
            .ok_or_else(|| {
                Error::Capture(format!(
                    "input device does not support {} Hz in f32, i16, u16 or i32",
                    self.config.sample_rate
                ))
            })?
            .with_sample_rate(rate);

        log::info!(
            "recording from {} ({} ch, {:?}, {} Hz)",
            device.name().unwrap_or_else(|_| "unknown device".into()),
            supported.channels(),
            supported.sample_format(),
            self.config.sample_rate
        );
        Ok((device, supported))
    }
}

impl AudioCapture for MicrophoneCapture {
    fn capture(&mut self, duration: Duration) -> Result<AudioBuffer, Error> {
        let config = self.config.clone().with_duration(duration);
        config.validate()?;
        let (device, supported) = self.open_device()?;

        let stream_config = StreamConfig {
            channels: supported.channels(),
            sample_rate: supported.sample_rate(),
            buffer_size: cpal::BufferSize::Default,
        };
        let recording = Arc::new(Mutex::new(Recording {
            samples: Vec::with_capacity(config.expected_frames()),
            ..Recording::default()
        }));

        let stream = match supported.sample_format() {
            SampleFormat::F32 => build_stream::<f32>(&device, &stream_config, recording.clone()),
            SampleFormat::I16 => build_stream::<i16>(&device, &stream_config, recording.clone()),
            SampleFormat::U16 => build_stream::<u16>(&device, &stream_config, recording.clone()),
            SampleFormat::I32 => build_stream::<i32>(&device, &stream_config, recording.clone()),
            other => Err(Error::Capture(format!(
                "unsupported sample format {:?}",
                other
            ))),
        }?;

        stream
            .play()
            .map_err(|e| Error::Capture(format!("cannot start stream: {}", e)))?;

        let interval = config.meter_interval();
        let start = Instant::now();
        let mut stderr = io::stderr();
        while start.elapsed() < duration {
            thread::sleep(interval.min(duration.saturating_sub(start.elapsed())));

            let (level, error) = match recording.lock() {
                Ok(rec) => (rec.level, rec.error.clone()),
                Err(_) => return Err(Error::Capture("capture state poisoned".into())),
            };
            if let Some(error) = error {
                return Err(Error::Capture(error));
            }
            if let Some(meter) = &self.meter {
                // A broken terminal must not abort the recording.
                let _ = meter.render(&mut stderr, level);
            }
        }

        // Dropping the stream stops the callback; the buffer is frozen after this.
        drop(stream);
        if let Some(meter) = &self.meter {
            let _ = meter.finish(&mut stderr);
        }

        let samples = match recording.lock() {
            Ok(mut rec) => {
                if let Some(error) = rec.error.take() {
                    return Err(Error::Capture(error));
                }
                std::mem::take(&mut rec.samples)
            }
            Err(_) => return Err(Error::Capture("capture state poisoned".into())),
        };

        let mut buffer = AudioBuffer::from_f32(&samples, self.config.sample_rate, 1);
        buffer.truncate_to(duration);
        if buffer.is_silent() {
            log::warn!("captured audio is silent; check the input device");
        }
        log::info!("captured {} frames", buffer.frames());
        Ok(buffer)
    }
}

/// Sample formats [`build_stream`] is instantiated for.
fn is_handled_format(format: SampleFormat) -> bool {
    matches!(
        format,
        SampleFormat::F32 | SampleFormat::I16 | SampleFormat::U16 | SampleFormat::I32
    )
}

fn build_stream<T>(
    device: &Device,
    config: &StreamConfig,
    recording: Arc<Mutex<Recording>>,
) -> Result<cpal::Stream, Error>
where
    T: SizedSample,
    f32: cpal::FromSample<T>,
{
    let channels = config.channels.max(1) as usize;
    let error_state = recording.clone();

    device
        .build_input_stream(
            config,
            move |data: &[T], _: &cpal::InputCallbackInfo| {
                let mono: Vec<f32> = data
                    .chunks(channels)
                    .map(|frame| {
                        frame.iter().map(|&s| s.to_sample::<f32>()).sum::<f32>() / frame.len() as f32
                    })
                    .collect();

                if let Ok(mut rec) = recording.lock() {
                    rec.level = rms_volume(&mono);
                    rec.samples.extend_from_slice(&mono);
                }
            },
            move |err| {
                log::warn!("input stream error: {}", err);
                if let Ok(mut rec) = error_state.lock() {
                    rec.error.get_or_insert_with(|| err.to_string());
                }
            },
            None,
        )
        .map_err(|e| Error::Capture(format!("cannot open input stream: {}", e)))
}
