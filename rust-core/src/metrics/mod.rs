//! Carrier quality estimators
//!
//! Every estimator reads the same centred frequency axis and linear PSD,
//! plus the interpolated carrier offset from [`parabolic_peak_interp`].
//! None of them fail: a measurement whose assumptions don't hold for a
//! capture is reported through one of the sentinel constants below.

pub mod adjacent;
pub mod bandwidth;
pub mod cnr;
pub mod peak;
pub mod rolloff;

pub use adjacent::{adjacent_channel_centers, measure_adjacent_rejection};
pub use bandwidth::measure_bandwidth_3db;
pub use cnr::estimate_cnr_db;
pub use peak::parabolic_peak_interp;
pub use rolloff::{measure_rolloff, Rolloff};

use std::ops::Range;

/// CNR when no bins lie outside the guard region
pub const CNR_NO_NOISE_BINS_DB: f64 = 0.0;

/// CNR when the estimated noise floor is zero
pub const CNR_NO_MEASURABLE_NOISE_DB: f64 = 100.0;

/// Bandwidth when a half-power edge can't be found
pub const BANDWIDTH_INCONCLUSIVE_HZ: f64 = 0.0;

/// Rejection when both adjacent channels carry no power
pub const REJECTION_NO_ADJACENT_POWER_DB: f64 = 100.0;

/// Asymmetry when either rolloff slope is not positive
pub const ASYMMETRY_UNDEFINED: f64 = 999.0;

/// Guards log10 against zero power
pub(crate) const POWER_EPSILON: f64 = 1e-12;

/// Integrate a PSD slice into total power: Σpsd × Δf
pub fn psd_to_power(psd: &[f64], bin_width_hz: f64) -> f64 {
    psd.iter().sum::<f64>() * bin_width_hz
}

/// Bin spacing of a centred axis, 1.0 when it has fewer than two bins
pub(crate) fn bin_width(freqs: &[f64]) -> f64 {
    match freqs {
        [first, second, ..] => second - first,
        _ => 1.0,
    }
}

/// Index of the bin closest to `freq_hz` (first one on ties)
pub(crate) fn nearest_bin(freqs: &[f64], freq_hz: f64) -> usize {
    let mut best = 0;
    let mut best_dist = f64::INFINITY;

    for (i, &f) in freqs.iter().enumerate() {
        let dist = (f - freq_hz).abs();
        if dist < best_dist {
            best_dist = dist;
            best = i;
        }
    }

    best
}

/// Index range of bins with lo_hz <= f <= hi_hz on an ascending axis
pub(crate) fn band_range(freqs: &[f64], lo_hz: f64, hi_hz: f64) -> Range<usize> {
    let start = freqs.partition_point(|&f| f < lo_hz);
    let end = freqs.partition_point(|&f| f <= hi_hz).max(start);
    start..end
}

/// Integrated power of the bins within ±half_width_hz of `center_hz`
///
/// The band is never narrower than ±Δf/2, so the bin nearest the centre is
/// always counted even when bins are wider than the requested band.
pub(crate) fn band_power(freqs: &[f64], psd: &[f64], center_hz: f64, half_width_hz: f64) -> f64 {
    let n = freqs.len().min(psd.len());
    let bin_width = bin_width(freqs);
    let half_width_hz = half_width_hz.max(bin_width / 2.0);
    let range = band_range(&freqs[..n], center_hz - half_width_hz, center_hz + half_width_hz);
    psd_to_power(&psd[range], bin_width)
}
