//! Synthetic IQ generators shared by the unit tests

use num_complex::Complex64;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use std::f64::consts::PI;

/// Unit-amplitude complex tone at `freq_hz` offset
pub fn tone(freq_hz: f64, sample_rate: f64, n_samples: usize) -> Vec<Complex64> {
    (0..n_samples)
        .map(|n| Complex64::from_polar(1.0, 2.0 * PI * freq_hz * n as f64 / sample_rate))
        .collect()
}

/// Seeded circular Gaussian noise with the given total power
pub fn complex_noise(power: f64, n_samples: usize, seed: u64) -> Vec<Complex64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let normal = Normal::new(0.0, (power / 2.0).sqrt()).unwrap();

    (0..n_samples)
        .map(|_| Complex64::new(normal.sample(&mut rng), normal.sample(&mut rng)))
        .collect()
}

/// Unit tone plus noise at `snr_db` below it
pub fn tone_with_noise(
    freq_hz: f64,
    sample_rate: f64,
    n_samples: usize,
    snr_db: f64,
    seed: u64,
) -> Vec<Complex64> {
    let noise_power = 10f64.powf(-snr_db / 10.0);
    let noise = complex_noise(noise_power, n_samples, seed);

    tone(freq_hz, sample_rate, n_samples)
        .into_iter()
        .zip(noise)
        .map(|(s, w)| s + w)
        .collect()
}

/// Add `gain * other` into `signal`
pub fn mix_in(signal: &mut [Complex64], other: &[Complex64], gain: f64) {
    for (s, &o) in signal.iter_mut().zip(other.iter()) {
        *s += o * gain;
    }
}
