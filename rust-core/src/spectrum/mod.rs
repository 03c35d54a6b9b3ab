//! Spectral estimation with FFT

pub mod fft;
pub mod welch;
pub mod windowing;

pub use fft::{fft_shift, FftEngine};
pub use welch::{welch_psd, WelchPsd};
pub use windowing::{generate_window, WindowType};
