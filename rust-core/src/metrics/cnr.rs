//! Carrier-to-noise ratio by Minimum Power Averaging (MPA)
//!
//! The noise floor is the mean of the quietest fraction of out-of-band bins,
//! which keeps adjacent stations out of the estimate. Carrier power is
//! integrated over the carrier band; noise power is the floor density over
//! the whole analysed span, so the result does not move with segment length.

use super::{band_power, bin_width, CNR_NO_MEASURABLE_NOISE_DB, CNR_NO_NOISE_BINS_DB};

/// Estimate CNR in dB
///
/// # Arguments
/// * `freqs` - Centred frequency axis in Hz
/// * `psd` - Linear power density
/// * `peak_freq_hz` - Interpolated carrier offset
/// * `guard_bw_hz` - Bins within ±guard of the carrier are never noise
/// * `carrier_bw_hz` - Carrier power is integrated over ±carrier_bw
/// * `noise_percentile` - Percent of quietest noise bins to average
///
/// # Returns
/// CNR in dB, [`CNR_NO_NOISE_BINS_DB`] when the guard covers the whole axis,
/// or [`CNR_NO_MEASURABLE_NOISE_DB`] when the floor is zero.
pub fn estimate_cnr_db(
    freqs: &[f64],
    psd: &[f64],
    peak_freq_hz: f64,
    guard_bw_hz: f64,
    carrier_bw_hz: f64,
    noise_percentile: f64,
) -> f64 {
    let carrier_power = band_power(freqs, psd, peak_freq_hz, carrier_bw_hz);

    let mut noise_bins: Vec<f64> = freqs
        .iter()
        .zip(psd.iter())
        .filter(|(&f, _)| (f - peak_freq_hz).abs() > guard_bw_hz)
        .map(|(_, &p)| p)
        .collect();

    if noise_bins.is_empty() {
        return CNR_NO_NOISE_BINS_DB;
    }

    let quietest = ((noise_bins.len() as f64 * noise_percentile / 100.0) as usize)
        .clamp(1, noise_bins.len());
    noise_bins.sort_by(f64::total_cmp);
    let noise_floor = noise_bins[..quietest].iter().sum::<f64>() / quietest as f64;

    if noise_floor <= 0.0 {
        return CNR_NO_MEASURABLE_NOISE_DB;
    }

    // Floor density across the full span (N bins × Δf = sample rate)
    let noise_power = noise_floor * freqs.len().min(psd.len()) as f64 * bin_width(freqs);

    10.0 * (carrier_power / noise_power).log10()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FingerprintConfig;
    use crate::spectrum::welch_psd;
    use crate::test_signals::tone_with_noise;

    const FS: f64 = 2.4e6;

    fn cnr_default(freqs: &[f64], psd: &[f64], peak: f64) -> f64 {
        estimate_cnr_db(freqs, psd, peak, 150e3, 50e3, 5.0)
    }

    #[test]
    fn test_cnr_extraction_accuracy() {
        let config = FingerprintConfig::default();

        for true_snr_db in [10.0, 20.0, 30.0, 40.0] {
            let samples = tone_with_noise(0.0, FS, 1_200_000, true_snr_db, 42);
            let psd = welch_psd(&samples, FS, &config).unwrap();

            let measured = cnr_default(&psd.freqs, &psd.psd, 0.0);
            assert!(
                (measured - true_snr_db).abs() < 2.0,
                "true {true_snr_db} dB, measured {measured:.2} dB"
            );
        }
    }

    #[test]
    fn test_cnr_dimensional_consistency() {
        let samples = tone_with_noise(0.0, FS, 1_200_000, 25.0, 9);

        let results: Vec<f64> = [2048, 4096, 8192]
            .into_iter()
            .map(|length| {
                let config = FingerprintConfig::with_segment_length(length);
                let psd = welch_psd(&samples, FS, &config).unwrap();
                cnr_default(&psd.freqs, &psd.psd, 0.0)
            })
            .collect();

        let max = results.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let min = results.iter().cloned().fold(f64::INFINITY, f64::min);
        assert!(max - min < 1.0, "CNR spread across L: {results:?}");
    }

    #[test]
    fn test_no_noise_bins() {
        let freqs = [-100e3, 0.0, 100e3];
        let psd = [1.0, 5.0, 1.0];

        assert_eq!(cnr_default(&freqs, &psd, 0.0), CNR_NO_NOISE_BINS_DB);
    }

    #[test]
    fn test_zero_noise_floor_saturates() {
        let freqs: Vec<f64> = (-500..500).map(|i| i as f64 * 1e3).collect();
        let mut psd = vec![0.0; freqs.len()];
        psd[500] = 1.0;

        assert_eq!(cnr_default(&freqs, &psd, 0.0), CNR_NO_MEASURABLE_NOISE_DB);
    }

    #[test]
    fn test_mpa_ignores_interferer() {
        // Flat floor with a strong neighbour outside the guard region
        let freqs: Vec<f64> = (-1000..1000).map(|i| i as f64 * 1e3).collect();
        let mut psd = vec![1e-6; freqs.len()];
        psd[1000] = 1.0;
        let clean = cnr_default(&freqs, &psd, 0.0);

        for p in &mut psd[1300..1400] {
            *p = 1e-2;
        }
        let contaminated = cnr_default(&freqs, &psd, 0.0);

        assert!((clean - contaminated).abs() < 1e-9);
    }

    #[test]
    fn test_percentile_keeps_at_least_one_bin() {
        let freqs: Vec<f64> = (-300..300).map(|i| i as f64 * 1e3).collect();
        let mut psd = vec![1e-3; freqs.len()];
        psd[300] = 1.0;

        // 0.01% of ~300 noise bins rounds to zero; one bin is still used
        let cnr = estimate_cnr_db(&freqs, &psd, 0.0, 150e3, 50e3, 0.01);
        assert!(cnr.is_finite());
    }
}
