//! Sample-loading seam
//!
//! Capture backends (RTL-SDR, BladeRF, SigMF readers) live outside this
//! crate and hand over IQ blocks through [`SampleSource`].

use crate::error::{FingerprintError, Result};
use crate::fingerprint::{Fingerprint, Fingerprinter};
use num_complex::Complex64;

/// One block of IQ samples with its tuning metadata
#[derive(Debug, Clone, PartialEq)]
pub struct Capture {
    pub samples: Vec<Complex64>,
    pub sample_rate_hz: f64,
    pub center_freq_hz: f64,
}

impl Capture {
    pub fn new(samples: Vec<Complex64>, sample_rate_hz: f64, center_freq_hz: f64) -> Self {
        Self {
            samples,
            sample_rate_hz,
            center_freq_hz,
        }
    }

    /// Capture length in seconds
    pub fn duration_sec(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate_hz
    }
}

/// Anything that can produce a capture
pub trait SampleSource {
    fn load(&mut self) -> Result<Capture>;
}

/// An in-memory capture yields itself once, then reports
/// [`FingerprintError::SourceExhausted`]
impl SampleSource for Option<Capture> {
    fn load(&mut self) -> Result<Capture> {
        self.take().ok_or(FingerprintError::SourceExhausted)
    }
}

/// Load a capture and fingerprint it
pub fn fingerprint_source<S, F>(source: &mut S, fingerprinter: &F) -> Result<Fingerprint>
where
    S: SampleSource + ?Sized,
    F: Fingerprinter + ?Sized,
{
    let capture = source.load()?;
    log::debug!(
        "loaded {} samples ({:.3} s) at {:.3} MHz",
        capture.samples.len(),
        capture.duration_sec(),
        capture.center_freq_hz / 1e6
    );

    fingerprinter.extract(
        &capture.samples,
        capture.sample_rate_hz,
        capture.center_freq_hz,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fingerprint::FmFingerprinter;
    use crate::test_signals::tone_with_noise;

    struct Looping {
        block: Capture,
        loads: usize,
    }

    impl SampleSource for Looping {
        fn load(&mut self) -> Result<Capture> {
            self.loads += 1;
            Ok(self.block.clone())
        }
    }

    #[test]
    fn test_fingerprint_from_source() {
        let capture = Capture::new(tone_with_noise(-40e3, 2.4e6, 96_000, 25.0, 12), 2.4e6, 98.7e6);
        assert!((capture.duration_sec() - 0.04).abs() < 1e-12);

        let mut source = Looping {
            block: capture,
            loads: 0,
        };
        let fingerprinter = FmFingerprinter::default();

        let fp = fingerprint_source(&mut source, &fingerprinter).unwrap();
        assert_eq!(source.loads, 1);
        assert!((fp.peak_freq_hz - (98.7e6 - 40e3)).abs() < 100.0);
    }

    #[test]
    fn test_in_memory_capture_yields_once() {
        let mut source = Some(Capture::new(vec![Complex64::new(0.0, 0.0); 8192], 2.4e6, 0.0));

        assert!(fingerprint_source(&mut source, &FmFingerprinter::default()).is_ok());
        assert_eq!(source.load(), Err(FingerprintError::SourceExhausted));
        assert!(matches!(
            fingerprint_source(&mut source, &FmFingerprinter::default()),
            Err(FingerprintError::SourceExhausted)
        ));
    }
}
