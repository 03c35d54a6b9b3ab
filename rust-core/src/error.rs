//! Error types for fingerprint extraction

use thiserror::Error;

/// Fatal errors raised while forming the PSD.
///
/// Degenerate metrics are never errors; they are reported through the
/// sentinel values in [`crate::metrics`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FingerprintError {
    #[error("Insufficient samples: got {available}, need at least one segment of {required}")]
    InsufficientSamples { available: usize, required: usize },

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Sample source exhausted: no capture left to load")]
    SourceExhausted,
}

pub type Result<T> = std::result::Result<T, FingerprintError>;
