//! PyO3 bindings for Python integration

use pyo3::prelude::*;

mod fingerprint_bindings;

/// Python module definition
#[pymodule]
fn fm_fingerprint(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_class::<fingerprint_bindings::PyFingerprint>()?;
    m.add_function(wrap_pyfunction!(fingerprint_bindings::extract_fingerprint, m)?)?;

    Ok(())
}
