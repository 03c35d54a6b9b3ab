//! Occupied bandwidth at the half-power (3 dB) points

use super::{nearest_bin, BANDWIDTH_INCONCLUSIVE_HZ};

/// Measure the 3 dB bandwidth around the carrier
///
/// Scans outward from the bin nearest `peak_freq_hz` until a bin drops below
/// half the peak power. Each edge is placed at the linear half-power crossing
/// between that bin and its inward neighbour, so a lone bin measures exactly
/// one bin width.
///
/// This differs from taking the first below-threshold bin's own frequency as
/// the edge. That rule reads wider by up to one bin per side (two bin widths
/// for a lone bin), so expect this value to sit below one computed that way.
///
/// # Returns
/// Bandwidth in Hz, or [`BANDWIDTH_INCONCLUSIVE_HZ`] when either scan runs
/// off the end of the axis.
pub fn measure_bandwidth_3db(freqs: &[f64], psd: &[f64], peak_freq_hz: f64) -> f64 {
    let n = freqs.len().min(psd.len());
    if n == 0 {
        return BANDWIDTH_INCONCLUSIVE_HZ;
    }

    let peak_idx = nearest_bin(&freqs[..n], peak_freq_hz);
    let threshold = psd[peak_idx] / 2.0;

    let left = (0..peak_idx)
        .rev()
        .find(|&i| psd[i] < threshold)
        .map(|i| half_power_crossing(freqs, psd, i + 1, i, threshold));

    let right = (peak_idx + 1..n)
        .find(|&i| psd[i] < threshold)
        .map(|i| half_power_crossing(freqs, psd, i - 1, i, threshold));

    match (left, right) {
        (Some(left_edge), Some(right_edge)) => right_edge - left_edge,
        _ => BANDWIDTH_INCONCLUSIVE_HZ,
    }
}

/// Frequency where power falls through `threshold` between an inner bin
/// (at or above it) and the adjacent outer bin (below it)
fn half_power_crossing(
    freqs: &[f64],
    psd: &[f64],
    inner: usize,
    outer: usize,
    threshold: f64,
) -> f64 {
    let drop = psd[inner] - psd[outer];
    let fraction = if drop > 0.0 {
        ((psd[inner] - threshold) / drop).clamp(0.0, 1.0)
    } else {
        1.0
    };

    freqs[inner] + fraction * (freqs[outer] - freqs[inner])
}
