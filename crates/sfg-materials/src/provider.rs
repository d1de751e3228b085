//! Refractive-index provider trait.
//!
//! Every medium of an SFG setup implements [`RefractiveIndexProvider`],
//! which returns the complex refractive index $\tilde{n} = n + ik$ at a
//! vacuum wavelength.

use num_complex::Complex64;
use thiserror::Error;

/// Errors from refractive-index providers.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MaterialError {
    #[error("Wavelength {wavelength_nm} nm is outside the data range [{min}, {max}] nm")]
    OutOfRange {
        wavelength_nm: f64,
        min: f64,
        max: f64,
    },

    #[error("Material not found: {0}")]
    NotFound(String),

    #[error("Data error: {0}")]
    DataError(String),
}

/// Provides the wavelength-dependent refractive index of a medium.
///
/// Implementations include constant indices, Sellmeier dispersion formulas
/// and tabulated (n, k) data.
pub trait RefractiveIndexProvider: Send + Sync {
    /// Human-readable name of this material.
    fn name(&self) -> &str;

    /// Wavelength range over which the index is defined (nm).
    fn wavelength_range(&self) -> (f64, f64);

    /// Complex refractive index $\tilde{n}(\lambda)$ at a vacuum wavelength.
    fn refractive_index(&self, wavelength_nm: f64) -> Result<Complex64, MaterialError>;
}

/// Reject wavelengths outside `[min, max]`.
pub(crate) fn check_range(wavelength_nm: f64, (min, max): (f64, f64)) -> Result<(), MaterialError> {
    if !(min..=max).contains(&wavelength_nm) {
        return Err(MaterialError::OutOfRange {
            wavelength_nm,
            min,
            max,
        });
    }
    Ok(())
}
