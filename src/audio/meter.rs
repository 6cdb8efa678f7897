//! Terminal volume meter.

use std::io::{self, Write};

/// RMS level of `samples`, clamped to `[0.0, 1.0]`. Empty input is silent.
pub fn rms_volume(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum_squares: f32 = samples.iter().map(|s| s * s).sum();
    let rms = (sum_squares / samples.len() as f32).sqrt();
    if rms.is_nan() {
        0.0
    } else {
        rms.min(1.0)
    }
}

/// Render a fixed-width bar such as `[#####     ]` for a level in `[0, 1]`.
///
/// Levels outside the range are clamped, so the bar is always `width + 2`
/// characters wide.
pub fn volume_bar(level: f32, width: usize) -> String {
    let filled = ((level.clamp(0.0, 1.0) * width as f32) as usize).min(width);
    format!("[{}{}]", "#".repeat(filled), " ".repeat(width - filled))
}

/// Redraws a volume bar in place on a terminal line.
#[derive(Debug, Clone)]
pub struct VolumeMeter {
    width: usize,
}

impl VolumeMeter {
    /// Create a meter `width` columns wide.
    pub fn new(width: usize) -> Self {
        Self { width }
    }

    /// Bar width in columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Overwrite the current line with the bar for `level`.
    pub fn render<W: Write>(&self, out: &mut W, level: f32) -> io::Result<()> {
        write!(out, "\r{}", volume_bar(level, self.width))?;
        out.flush()
    }

    /// End the meter line.
    pub fn finish<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out)
    }
}
