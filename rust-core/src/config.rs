//! Fingerprint tunables
//!
//! Every knob the core recognises arrives through [`FingerprintConfig`];
//! nothing is read from the environment.

use crate::error::{FingerprintError, Result};
use crate::spectrum::WindowType;
use serde::{Deserialize, Serialize};

/// Fingerprint extraction configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FingerprintConfig {
    /// FFT segment size (samples, power of two)
    pub segment_length: usize,

    /// Fraction of each segment shared with the next, in [0, 1)
    pub overlap_fraction: f64,

    /// Window applied to each segment
    pub window: WindowType,

    /// Half-width of the region excluded from noise estimation (Hz)
    pub guard_bandwidth_hz: f64,

    /// Half-width of the region integrated as carrier power (Hz)
    pub carrier_bandwidth_hz: f64,

    /// Percentage of quietest out-of-band bins averaged into the noise floor
    pub noise_percentile: f64,

    /// Distance to the adjacent channel centres (Hz)
    pub adjacent_channel_spacing_hz: f64,
}

impl Default for FingerprintConfig {
    fn default() -> Self {
        Self {
            segment_length: 4096,
            overlap_fraction: 0.5,
            window: WindowType::Hann,
            guard_bandwidth_hz: 150e3,
            carrier_bandwidth_hz: 50e3,
            noise_percentile: 5.0,
            adjacent_channel_spacing_hz: 200e3,
        }
    }
}

impl FingerprintConfig {
    /// Same defaults with a different segment length
    pub fn with_segment_length(segment_length: usize) -> Self {
        Self {
            segment_length,
            ..Self::default()
        }
    }

    /// Hop between consecutive segments in samples
    pub fn step(&self) -> usize {
        (self.segment_length as f64 * (1.0 - self.overlap_fraction)).floor() as usize
    }

    /// Check the configuration against a sample rate
    pub fn validate(&self, sample_rate_hz: f64) -> Result<()> {
        if !sample_rate_hz.is_finite() || sample_rate_hz <= 0.0 {
            return Err(invalid(format!(
                "sample rate must be positive, got {sample_rate_hz}"
            )));
        }

        if self.segment_length < 2 || !self.segment_length.is_power_of_two() {
            return Err(invalid(format!(
                "segment length must be a power of two >= 2, got {}",
                self.segment_length
            )));
        }

        if !(0.0..1.0).contains(&self.overlap_fraction) {
            return Err(invalid(format!(
                "overlap fraction must be in [0, 1), got {}",
                self.overlap_fraction
            )));
        }

        if self.step() == 0 {
            return Err(invalid(format!(
                "overlap {} leaves no hop for segment length {}",
                self.overlap_fraction, self.segment_length
            )));
        }

        for (name, value) in [
            ("guard bandwidth", self.guard_bandwidth_hz),
            ("carrier bandwidth", self.carrier_bandwidth_hz),
            ("adjacent channel spacing", self.adjacent_channel_spacing_hz),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(invalid(format!("{name} must be positive, got {value}")));
            }
        }

        if !(self.noise_percentile > 0.0 && self.noise_percentile <= 100.0) {
            return Err(invalid(format!(
                "noise percentile must be in (0, 100], got {}",
                self.noise_percentile
            )));
        }

        Ok(())
    }
}

fn invalid(message: String) -> FingerprintError {
    FingerprintError::InvalidConfiguration(message)
}

/// Thresholds used by quality validation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QualityThresholds {
    pub min_cnr_db: f64,
    pub min_bandwidth_hz: f64,
    pub max_bandwidth_hz: f64,
    pub min_adjacent_rejection_db: f64,
    pub max_rolloff_asymmetry: f64,
}

impl Default for QualityThresholds {
    fn default() -> Self {
        // FM broadcast: 180-220 kHz occupied, >= 15 dB rejection,
        // asymmetry above 2x means bleed into a neighbour
        Self {
            min_cnr_db: 10.0,
            min_bandwidth_hz: 180e3,
            max_bandwidth_hz: 220e3,
            min_adjacent_rejection_db: 15.0,
            max_rolloff_asymmetry: 2.0,
        }
    }
}
