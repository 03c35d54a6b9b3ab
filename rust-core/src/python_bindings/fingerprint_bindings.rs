//! Python bindings for fingerprint extraction

use crate::config::{FingerprintConfig, QualityThresholds};
use crate::error::FingerprintError;
use crate::fingerprint::{self, Fingerprint};
use numpy::{Complex64, PyReadonlyArray1};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PyDict;

impl From<FingerprintError> for PyErr {
    fn from(err: FingerprintError) -> Self {
        PyValueError::new_err(err.to_string())
    }
}

/// Fingerprint record exposed to Python
#[pyclass(name = "Fingerprint", frozen)]
#[derive(Clone)]
pub struct PyFingerprint {
    inner: Fingerprint,
}

#[pymethods]
impl PyFingerprint {
    #[getter]
    fn peak_freq_hz(&self) -> f64 {
        self.inner.peak_freq_hz
    }

    #[getter]
    fn freq_error_hz(&self) -> f64 {
        self.inner.freq_error_hz
    }

    #[getter]
    fn cnr_db(&self) -> f64 {
        self.inner.cnr_db
    }

    #[getter]
    fn bandwidth_3db_hz(&self) -> f64 {
        self.inner.bandwidth_3db_hz
    }

    #[getter]
    fn adjacent_rejection_db(&self) -> f64 {
        self.inner.adjacent_rejection_db
    }

    #[getter]
    fn rolloff_left_slope(&self) -> f64 {
        self.inner.rolloff_left_slope
    }

    #[getter]
    fn rolloff_right_slope(&self) -> f64 {
        self.inner.rolloff_right_slope
    }

    #[getter]
    fn rolloff_asymmetry(&self) -> f64 {
        self.inner.rolloff_asymmetry
    }

    #[getter]
    fn processing_time_sec(&self) -> f64 {
        self.inner.processing_time_sec
    }

    #[getter]
    fn psd_segments(&self) -> usize {
        self.inner.psd_segments
    }

    #[getter]
    fn degraded_psd(&self) -> bool {
        self.inner.degraded_psd
    }

    /// Features as a dict, keyed like the database columns
    fn to_dict<'py>(&self, py: Python<'py>) -> PyResult<&'py PyDict> {
        let fp = &self.inner;
        let dict = PyDict::new(py);

        dict.set_item("peak_freq_hz", fp.peak_freq_hz)?;
        dict.set_item("freq_error_hz", fp.freq_error_hz)?;
        dict.set_item("cnr_db", fp.cnr_db)?;
        dict.set_item("bandwidth_3db_hz", fp.bandwidth_3db_hz)?;
        dict.set_item("adjacent_rejection_db", fp.adjacent_rejection_db)?;
        dict.set_item("rolloff_left_slope", fp.rolloff_left_slope)?;
        dict.set_item("rolloff_right_slope", fp.rolloff_right_slope)?;
        dict.set_item("rolloff_asymmetry", fp.rolloff_asymmetry)?;
        dict.set_item("processing_time_sec", fp.processing_time_sec)?;
        dict.set_item("psd_segments", fp.psd_segments)?;
        dict.set_item("degraded_psd", fp.degraded_psd)?;

        Ok(dict)
    }

    /// Check the record against FM broadcast thresholds
    ///
    /// Returns:
    ///     Tuple of (is_reliable, warnings)
    fn validate_quality(&self) -> (bool, Vec<String>) {
        let report = fingerprint::validate_quality(&self.inner, &QualityThresholds::default());
        (report.is_reliable, report.warnings)
    }

    fn __repr__(&self) -> String {
        format!(
            "Fingerprint(peak_freq_hz={:.1}, cnr_db={:.2}, bandwidth_3db_hz={:.1}, \
             adjacent_rejection_db={:.2}, rolloff_asymmetry={:.2})",
            self.inner.peak_freq_hz,
            self.inner.cnr_db,
            self.inner.bandwidth_3db_hz,
            self.inner.adjacent_rejection_db,
            self.inner.rolloff_asymmetry
        )
    }
}

/// Extract an FM fingerprint from complex IQ samples
///
/// Args:
///     samples: complex128 numpy array
///     sample_rate_hz: Sample rate in Hz
///     center_freq_hz: Tuner centre frequency in Hz
///
/// Returns:
///     Fingerprint
///
/// Raises:
///     ValueError: invalid configuration or fewer samples than one segment
#[pyfunction]
#[pyo3(signature = (
    samples,
    sample_rate_hz,
    center_freq_hz,
    segment_length=4096,
    overlap_fraction=0.5,
    guard_bandwidth_hz=150e3,
    carrier_bandwidth_hz=50e3,
    noise_percentile=5.0,
    adjacent_channel_spacing_hz=200e3
))]
#[allow(clippy::too_many_arguments)]
pub fn extract_fingerprint(
    py: Python<'_>,
    samples: PyReadonlyArray1<Complex64>,
    sample_rate_hz: f64,
    center_freq_hz: f64,
    segment_length: usize,
    overlap_fraction: f64,
    guard_bandwidth_hz: f64,
    carrier_bandwidth_hz: f64,
    noise_percentile: f64,
    adjacent_channel_spacing_hz: f64,
) -> PyResult<PyFingerprint> {
    let config = FingerprintConfig {
        segment_length,
        overlap_fraction,
        guard_bandwidth_hz,
        carrier_bandwidth_hz,
        noise_percentile,
        adjacent_channel_spacing_hz,
        ..FingerprintConfig::default()
    };

    let iq = samples
        .as_slice()
        .map_err(|e| PyValueError::new_err(e.to_string()))?;

    // Pure computation on borrowed data: release the GIL
    let inner = py.allow_threads(|| {
        fingerprint::extract_fingerprint(iq, sample_rate_hz, center_freq_hz, &config)
    })?;

    Ok(PyFingerprint { inner })
}
