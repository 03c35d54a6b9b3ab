//! Welch power spectral density estimation
//!
//! Averages density-scaled periodograms of overlapping, windowed segments.
//! The output is linear power per Hz on a centred, ascending frequency axis.

use super::fft::{fft_shift, FftEngine};
use super::windowing::{apply_window_inplace, generate_window, window_energy};
use crate::config::FingerprintConfig;
use crate::error::{FingerprintError, Result};
use num_complex::Complex64;

/// Frequency axis and PSD produced together from one IQ block
#[derive(Debug, Clone)]
pub struct WelchPsd {
    /// Frequency offsets in Hz, ascending, DC at index N/2
    pub freqs: Vec<f64>,

    /// Linear power density per bin, index-aligned with `freqs`
    pub psd: Vec<f64>,

    /// Bin spacing in Hz (sample_rate / segment_length)
    pub bin_width_hz: f64,

    /// Number of periodograms averaged
    pub segments: usize,

    /// Set when only a single segment fit, so nothing was averaged
    pub degraded: bool,
}

impl WelchPsd {
    /// Number of bins
    pub fn len(&self) -> usize {
        self.psd.len()
    }

    pub fn is_empty(&self) -> bool {
        self.psd.is_empty()
    }
}

/// Estimate the PSD of `samples` with Welch's method
///
/// # Arguments
/// * `samples` - Complex baseband samples
/// * `sample_rate` - Sample rate in Hz
/// * `config` - Segment length, overlap and window
///
/// # Errors
/// `InvalidConfiguration` for bad tunables, `InsufficientSamples` when the
/// block is shorter than one segment.
pub fn welch_psd(
    samples: &[Complex64],
    sample_rate: f64,
    config: &FingerprintConfig,
) -> Result<WelchPsd> {
    config.validate(sample_rate)?;

    let segment_length = config.segment_length;
    if samples.len() < segment_length {
        return Err(FingerprintError::InsufficientSamples {
            available: samples.len(),
            required: segment_length,
        });
    }

    let step = config.step();
    let segments = 1 + (samples.len() - segment_length) / step;
    let degraded = segments < 2;
    if degraded {
        log::warn!(
            "only {} samples for segment length {}: single periodogram, no averaging",
            samples.len(),
            segment_length
        );
    }

    let window = generate_window(config.window, segment_length);
    let scale = 1.0 / (sample_rate * window_energy(&window));

    let mut engine = FftEngine::new(segment_length);
    let mut accumulated = vec![0.0; segment_length];
    let mut buffer = vec![Complex64::new(0.0, 0.0); segment_length];

    // Fixed reduction order: segments are summed in ascending start offset
    for start in (0..segments).map(|k| k * step) {
        buffer.copy_from_slice(&samples[start..start + segment_length]);
        apply_window_inplace(&mut buffer, &window);
        engine.accumulate_power(&mut buffer, &mut accumulated);
    }

    let norm = scale / segments as f64;
    let averaged: Vec<f64> = accumulated.iter().map(|&p| p * norm).collect();

    let bin_width_hz = engine.bin_width_hz(sample_rate);
    log::debug!(
        "welch psd: {} segments of {} (step {}), {:.3} Hz/bin",
        segments,
        segment_length,
        step,
        bin_width_hz
    );

    Ok(WelchPsd {
        freqs: engine.centered_frequency_axis(sample_rate),
        psd: fft_shift(&averaged),
        bin_width_hz,
        segments,
        degraded,
    })
}
