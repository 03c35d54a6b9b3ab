//! FM Fingerprint - Spectral Quality Core
//!
//! Turns a block of complex baseband samples into a fixed set of carrier
//! metrics: sub-bin frequency, CNR, 3 dB bandwidth, adjacent-channel
//! rejection and rolloff asymmetry, all read from one Welch PSD.

// Suppress PyO3 non-local impl warnings (harmless macro-generated code)
#![cfg_attr(feature = "python", allow(non_local_definitions))]

pub mod config;
pub mod error;
pub mod fingerprint;
pub mod metrics;
pub mod source;
pub mod spectrum;

#[cfg(feature = "python")]
pub mod python_bindings;

#[cfg(test)]
mod test_signals;

pub use config::{FingerprintConfig, QualityThresholds};
pub use error::{FingerprintError, Result};
pub use fingerprint::{
    extract_fingerprint, validate_quality, Fingerprint, Fingerprinter, FmFingerprinter,
    QualityReport,
};
pub use source::{fingerprint_source, Capture, SampleSource};
pub use spectrum::{welch_psd, WelchPsd, WindowType};
