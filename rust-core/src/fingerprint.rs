//! Fingerprint orchestration
//!
//! Runs the Welch estimator, locates the carrier, then hands the shared PSD
//! to every quality estimator and assembles one immutable record.

use crate::config::{FingerprintConfig, QualityThresholds};
use crate::error::Result;
use crate::metrics::{
    estimate_cnr_db, measure_adjacent_rejection, measure_bandwidth_3db, measure_rolloff,
    parabolic_peak_interp, ASYMMETRY_UNDEFINED, BANDWIDTH_INCONCLUSIVE_HZ,
};
use crate::spectrum::welch_psd;
use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Spectral fingerprint of one capture
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fingerprint {
    /// Interpolated carrier frequency (absolute, Hz)
    pub peak_freq_hz: f64,

    /// Carrier offset from the tuner centre (Hz)
    pub freq_error_hz: f64,

    pub cnr_db: f64,
    pub bandwidth_3db_hz: f64,
    pub adjacent_rejection_db: f64,

    /// dB per 100 kHz
    pub rolloff_left_slope: f64,
    pub rolloff_right_slope: f64,
    pub rolloff_asymmetry: f64,

    /// Wall-clock time spent in extraction
    pub processing_time_sec: f64,

    /// Periodograms averaged into the PSD
    pub psd_segments: usize,

    /// The PSD came from a single segment
    pub degraded_psd: bool,
}

/// Extract a fingerprint from one block of IQ samples
///
/// # Arguments
/// * `samples` - Complex baseband samples, borrowed for the call only
/// * `sample_rate_hz` - Sample rate in Hz
/// * `center_freq_hz` - Tuner centre frequency in Hz
/// * `config` - Estimator tunables
///
/// # Errors
/// Only the spectral estimator can fail (`InvalidConfiguration`,
/// `InsufficientSamples`). Degenerate metrics come back as sentinels.
pub fn extract_fingerprint(
    samples: &[Complex64],
    sample_rate_hz: f64,
    center_freq_hz: f64,
    config: &FingerprintConfig,
) -> Result<Fingerprint> {
    let started = Instant::now();

    let psd = welch_psd(samples, sample_rate_hz, config)?;
    let (freqs, density) = (&psd.freqs, &psd.psd);

    let peak_offset = parabolic_peak_interp(freqs, density);

    let cnr_db = estimate_cnr_db(
        freqs,
        density,
        peak_offset,
        config.guard_bandwidth_hz,
        config.carrier_bandwidth_hz,
        config.noise_percentile,
    );
    let bandwidth_3db_hz = measure_bandwidth_3db(freqs, density, peak_offset);
    let adjacent_rejection_db = measure_adjacent_rejection(
        freqs,
        density,
        peak_offset,
        config.adjacent_channel_spacing_hz,
    );
    let rolloff = measure_rolloff(freqs, density, peak_offset);

    let fingerprint = Fingerprint {
        peak_freq_hz: center_freq_hz + peak_offset,
        freq_error_hz: peak_offset,
        cnr_db,
        bandwidth_3db_hz,
        adjacent_rejection_db,
        rolloff_left_slope: rolloff.left_slope,
        rolloff_right_slope: rolloff.right_slope,
        rolloff_asymmetry: rolloff.asymmetry,
        processing_time_sec: started.elapsed().as_secs_f64(),
        psd_segments: psd.segments,
        degraded_psd: psd.degraded,
    };

    log::debug!(
        "fingerprint @ {:.6} MHz: error {:+.1} Hz, CNR {:.1} dB, BW {:.1} kHz, \
         rejection {:.1} dB, asymmetry {:.2}x in {:.1} ms",
        fingerprint.peak_freq_hz / 1e6,
        fingerprint.freq_error_hz,
        fingerprint.cnr_db,
        fingerprint.bandwidth_3db_hz / 1e3,
        fingerprint.adjacent_rejection_db,
        fingerprint.rolloff_asymmetry,
        fingerprint.processing_time_sec * 1e3
    );

    Ok(fingerprint)
}

/// Outcome of a quality check; warnings never remove data
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct QualityReport {
    pub is_reliable: bool,
    pub warnings: Vec<String>,
}

/// A modulation-specific fingerprint extractor
pub trait Fingerprinter {
    /// Extract features from IQ data
    fn extract(
        &self,
        samples: &[Complex64],
        sample_rate_hz: f64,
        center_freq_hz: f64,
    ) -> Result<Fingerprint>;

    /// Inspect a fingerprint for unreliable metrics
    fn validate_quality(&self, _fingerprint: &Fingerprint) -> QualityReport {
        QualityReport {
            is_reliable: true,
            warnings: Vec::new(),
        }
    }
}

/// FM broadcast fingerprinter
#[derive(Debug, Clone, Default)]
pub struct FmFingerprinter {
    config: FingerprintConfig,
    thresholds: QualityThresholds,
}

impl FmFingerprinter {
    pub fn new(config: FingerprintConfig, thresholds: QualityThresholds) -> Self {
        Self { config, thresholds }
    }

    pub fn config(&self) -> &FingerprintConfig {
        &self.config
    }

    pub fn thresholds(&self) -> &QualityThresholds {
        &self.thresholds
    }
}

impl Fingerprinter for FmFingerprinter {
    fn extract(
        &self,
        samples: &[Complex64],
        sample_rate_hz: f64,
        center_freq_hz: f64,
    ) -> Result<Fingerprint> {
        extract_fingerprint(samples, sample_rate_hz, center_freq_hz, &self.config)
    }

    fn validate_quality(&self, fingerprint: &Fingerprint) -> QualityReport {
        validate_quality(fingerprint, &self.thresholds)
    }
}

/// Flag metrics that fall outside FM broadcast expectations
pub fn validate_quality(fingerprint: &Fingerprint, thresholds: &QualityThresholds) -> QualityReport {
    let mut warnings = Vec::new();

    if fingerprint.degraded_psd {
        warnings.push("PSD estimated from a single segment (no averaging)".to_string());
    }

    if fingerprint.cnr_db < thresholds.min_cnr_db {
        warnings.push(format!(
            "CNR {:.1} dB below {:.1} dB",
            fingerprint.cnr_db, thresholds.min_cnr_db
        ));
    }

    if fingerprint.bandwidth_3db_hz == BANDWIDTH_INCONCLUSIVE_HZ {
        warnings.push("3 dB bandwidth not measurable".to_string());
    } else if fingerprint.bandwidth_3db_hz < thresholds.min_bandwidth_hz
        || fingerprint.bandwidth_3db_hz > thresholds.max_bandwidth_hz
    {
        warnings.push(format!(
            "3 dB bandwidth {:.1} kHz outside {:.0}-{:.0} kHz",
            fingerprint.bandwidth_3db_hz / 1e3,
            thresholds.min_bandwidth_hz / 1e3,
            thresholds.max_bandwidth_hz / 1e3
        ));
    }

    if fingerprint.adjacent_rejection_db < thresholds.min_adjacent_rejection_db {
        warnings.push(format!(
            "adjacent rejection {:.1} dB below {:.1} dB",
            fingerprint.adjacent_rejection_db, thresholds.min_adjacent_rejection_db
        ));
    }

    if fingerprint.rolloff_asymmetry >= ASYMMETRY_UNDEFINED {
        warnings.push("rolloff asymmetry undefined".to_string());
    } else if fingerprint.rolloff_asymmetry > thresholds.max_rolloff_asymmetry {
        warnings.push(format!(
            "rolloff asymmetry {:.2}x above {:.2}x (possible adjacent bleed)",
            fingerprint.rolloff_asymmetry, thresholds.max_rolloff_asymmetry
        ));
    }

    for warning in &warnings {
        log::warn!("{warning}");
    }

    QualityReport {
        is_reliable: warnings.is_empty(),
        warnings,
    }
}
