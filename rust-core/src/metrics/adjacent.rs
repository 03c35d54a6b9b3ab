//! Adjacent-channel rejection
//!
//! Compares carrier power with the mean power found one channel spacing
//! below and above it. US FM broadcast uses 200 kHz spacing; a clean
//! station shows at least 15 dB.

use super::{band_power, REJECTION_NO_ADJACENT_POWER_DB};

/// Half-width of the carrier and adjacent integration bands (Hz)
pub const CHANNEL_HALF_WIDTH_HZ: f64 = 50e3;

/// Lower and upper adjacent channel centres, in that order
pub fn adjacent_channel_centers(peak_freq_hz: f64, channel_spacing_hz: f64) -> (f64, f64) {
    (
        peak_freq_hz - channel_spacing_hz,
        peak_freq_hz + channel_spacing_hz,
    )
}

/// Measure adjacent-channel rejection in dB
///
/// # Arguments
/// * `freqs` - Centred frequency axis in Hz
/// * `psd` - Linear power density
/// * `peak_freq_hz` - Interpolated carrier offset
/// * `channel_spacing_hz` - Distance to each adjacent channel centre
///
/// # Returns
/// 10·log10(carrier / mean(lower, upper)), or
/// [`REJECTION_NO_ADJACENT_POWER_DB`] when neither neighbour has any power.
pub fn measure_adjacent_rejection(
    freqs: &[f64],
    psd: &[f64],
    peak_freq_hz: f64,
    channel_spacing_hz: f64,
) -> f64 {
    let carrier_power = band_power(freqs, psd, peak_freq_hz, CHANNEL_HALF_WIDTH_HZ);

    let (lower_center, upper_center) = adjacent_channel_centers(peak_freq_hz, channel_spacing_hz);
    let lower_power = band_power(freqs, psd, lower_center, CHANNEL_HALF_WIDTH_HZ);
    let upper_power = band_power(freqs, psd, upper_center, CHANNEL_HALF_WIDTH_HZ);

    let adjacent_power = (lower_power + upper_power) / 2.0;
    if adjacent_power <= 0.0 {
        return REJECTION_NO_ADJACENT_POWER_DB;
    }

    10.0 * (carrier_power / adjacent_power).log10()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FingerprintConfig;
    use crate::metrics::band_range;
    use crate::spectrum::welch_psd;
    use crate::test_signals::{mix_in, tone, tone_with_noise};

    const FS: f64 = 2.4e6;
    const N: usize = 600_000;

    #[test]
    fn test_adjacent_rejection_with_weak_interferers() {
        let mut samples = tone_with_noise(0.0, FS, N, 40.0, 1);
        mix_in(&mut samples, &tone(-200e3, FS, N), 0.1);
        mix_in(&mut samples, &tone(200e3, FS, N), 0.1);

        let psd = welch_psd(&samples, FS, &FingerprintConfig::default()).unwrap();
        let rejection = measure_adjacent_rejection(&psd.freqs, &psd.psd, 0.0, 200e3);

        // Each interferer sits 20 dB down
        assert!(rejection > 15.0, "rejection {rejection:.1} dB");
        assert!((rejection - 20.0).abs() < 1.0, "rejection {rejection:.1} dB");
    }

    #[test]
    fn test_adjacent_rejection_consistent_across_segment_lengths() {
        let samples = tone_with_noise(0.0, FS, 1_200_000, 30.0, 2);

        let results: Vec<f64> = [2048, 4096, 8192]
            .into_iter()
            .map(|length| {
                let config = FingerprintConfig::with_segment_length(length);
                let psd = welch_psd(&samples, FS, &config).unwrap();
                measure_adjacent_rejection(&psd.freqs, &psd.psd, 0.0, 200e3)
            })
            .collect();

        let mean = results.iter().sum::<f64>() / results.len() as f64;
        let std = (results.iter().map(|r| (r - mean).powi(2)).sum::<f64>()
            / results.len() as f64)
            .sqrt();
        assert!(std < 2.0, "rejection std {std:.2} dB: {results:?}");
    }

    #[test]
    fn test_lower_and_upper_bands_are_distinct() {
        let (lower, upper) = adjacent_channel_centers(12.5e3, 200e3);
        assert_eq!(lower, -187.5e3);
        assert_eq!(upper, 212.5e3);

        let freqs: Vec<f64> = (0..4096).map(|i| (i as f64 - 2048.0) * 585.9375).collect();
        let lower_bins = band_range(&freqs, lower - CHANNEL_HALF_WIDTH_HZ, lower + CHANNEL_HALF_WIDTH_HZ);
        let upper_bins = band_range(&freqs, upper - CHANNEL_HALF_WIDTH_HZ, upper + CHANNEL_HALF_WIDTH_HZ);

        assert!(!lower_bins.is_empty() && !upper_bins.is_empty());
        assert!(lower_bins.end <= upper_bins.start);
    }

    #[test]
    fn test_one_sided_interferer_counts_once() {
        // Only the upper neighbour is occupied: mean adjacent power halves,
        // so rejection must be ~3 dB above the two-sided case
        let mut samples = tone_with_noise(0.0, FS, N, 60.0, 3);
        mix_in(&mut samples, &tone(200e3, FS, N), 0.1);

        let psd = welch_psd(&samples, FS, &FingerprintConfig::default()).unwrap();
        let rejection = measure_adjacent_rejection(&psd.freqs, &psd.psd, 0.0, 200e3);

        assert!((rejection - 23.0).abs() < 1.0, "rejection {rejection:.1} dB");
    }

    #[test]
    fn test_no_adjacent_power() {
        let freqs: Vec<f64> = (-500..500).map(|i| i as f64 * 1e3).collect();
        let mut psd = vec![0.0; freqs.len()];
        psd[500] = 1.0;

        assert_eq!(
            measure_adjacent_rejection(&freqs, &psd, 0.0, 200e3),
            REJECTION_NO_ADJACENT_POWER_DB
        );
    }
}
