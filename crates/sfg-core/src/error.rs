//! Error type shared by the validating entry points of `sfg-core`.
//!
//! The closed-form optics and lineshape functions never fail: a zero
//! damping constant at resonance or a total-internal-reflection angle shows
//! up as an ordinary floating-point special value. Only operations that
//! interpret caller configuration (point groups, tensor elements, tilt
//! distributions, fit inputs) return [`SfgError`].

use thiserror::Error;

/// Errors raised by configuration-checking operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SfgError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Length mismatch for {what}: expected {expected}, got {actual}")]
    LengthMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Fit error: {0}")]
    Fit(String),
}

/// Convenience alias for results in this crate.
pub type SfgResult<T> = Result<T, SfgError>;
