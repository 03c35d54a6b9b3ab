//! FFT engine using rustfft for complex baseband signals
//!
//! IQ data has no Hermitian symmetry, so the full two-sided spectrum is kept.

use num_complex::Complex64;
use rustfft::{Fft, FftPlanner};
use std::sync::Arc;

/// FFT engine for complex-valued signals
pub struct FftEngine {
    /// FFT size (number of samples)
    fft_size: usize,

    /// Forward complex FFT processor
    fft: Arc<dyn Fft<f64>>,

    /// Reusable scratch buffer
    scratch: Vec<Complex64>,
}

impl FftEngine {
    /// Create new FFT engine
    ///
    /// # Arguments
    /// * `fft_size` - FFT size (number of samples)
    pub fn new(fft_size: usize) -> Self {
        let mut planner = FftPlanner::<f64>::new();
        let fft = planner.plan_fft_forward(fft_size);
        let scratch = vec![Complex64::new(0.0, 0.0); fft.get_inplace_scratch_len()];

        Self {
            fft_size,
            fft,
            scratch,
        }
    }

    /// Transform `buffer` in-place and add |X[k]|² into `accumulator`
    ///
    /// Both slices must be `fft_size` long. Bins are in natural FFT order
    /// (DC first).
    pub fn accumulate_power(&mut self, buffer: &mut [Complex64], accumulator: &mut [f64]) {
        self.fft.process_with_scratch(buffer, &mut self.scratch);

        for (acc, x) in accumulator.iter_mut().zip(buffer.iter()) {
            *acc += x.norm_sqr();
        }
    }

    /// Get FFT size
    pub fn fft_size(&self) -> usize {
        self.fft_size
    }

    /// Bin spacing in Hz for the given sample rate
    pub fn bin_width_hz(&self, sample_rate: f64) -> f64 {
        sample_rate / self.fft_size as f64
    }

    /// Centred frequency axis in Hz, ascending, DC at index `fft_size / 2`
    ///
    /// Matches the ordering produced by [`fft_shift`] on a natural-order spectrum.
    pub fn centered_frequency_axis(&self, sample_rate: f64) -> Vec<f64> {
        let bin_width = self.bin_width_hz(sample_rate);
        let half = (self.fft_size / 2) as f64;

        (0..self.fft_size)
            .map(|i| (i as f64 - half) * bin_width)
            .collect()
    }
}

/// Reorder a natural-order spectrum so negative frequencies come first
pub fn fft_shift<T: Clone>(spectrum: &[T]) -> Vec<T> {
    let mut shifted = spectrum.to_vec();
    shifted.rotate_right(spectrum.len() / 2);
    shifted
}
