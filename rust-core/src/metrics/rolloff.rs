//! Spectral rolloff on each side of the carrier
//!
//! Power 100-150 kHz away from the carrier is compared with the peak bin.
//! A station bleeding into one neighbour shows up as lopsided slopes.

use super::{band_range, nearest_bin, ASYMMETRY_UNDEFINED, POWER_EPSILON};
use serde::{Deserialize, Serialize};

const ROLLOFF_INNER_HZ: f64 = 100e3;
const ROLLOFF_OUTER_HZ: f64 = 150e3;

/// Left/right rolloff slopes and their ratio
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rolloff {
    /// Drop from peak to the lower band, dB per 100 kHz
    pub left_slope: f64,

    /// Drop from peak to the upper band, dB per 100 kHz
    pub right_slope: f64,

    /// max/min of the slopes, or [`ASYMMETRY_UNDEFINED`]
    pub asymmetry: f64,
}

/// Measure rolloff slopes and asymmetry
///
/// A side whose band lies beyond the axis gets a slope of 0.0, which in turn
/// makes the asymmetry [`ASYMMETRY_UNDEFINED`].
pub fn measure_rolloff(freqs: &[f64], psd: &[f64], peak_freq_hz: f64) -> Rolloff {
    let n = freqs.len().min(psd.len());
    if n == 0 {
        return Rolloff {
            left_slope: 0.0,
            right_slope: 0.0,
            asymmetry: ASYMMETRY_UNDEFINED,
        };
    }

    let freqs = &freqs[..n];
    let peak_power_db = to_db(psd[nearest_bin(freqs, peak_freq_hz)]);

    let slope = |lo_hz: f64, hi_hz: f64| {
        let band = &psd[band_range(freqs, lo_hz, hi_hz)];
        if band.is_empty() {
            return 0.0;
        }
        let side_power_db = to_db(band.iter().sum::<f64>() / band.len() as f64);
        (peak_power_db - side_power_db) / 100.0
    };

    let right_slope = slope(peak_freq_hz + ROLLOFF_INNER_HZ, peak_freq_hz + ROLLOFF_OUTER_HZ);
    let left_slope = slope(peak_freq_hz - ROLLOFF_OUTER_HZ, peak_freq_hz - ROLLOFF_INNER_HZ);

    let asymmetry = if left_slope > 0.0 && right_slope > 0.0 {
        left_slope.max(right_slope) / left_slope.min(right_slope)
    } else {
        ASYMMETRY_UNDEFINED
    };

    Rolloff {
        left_slope,
        right_slope,
        asymmetry,
    }
}

fn to_db(power: f64) -> f64 {
    10.0 * (power + POWER_EPSILON).log10()
}
