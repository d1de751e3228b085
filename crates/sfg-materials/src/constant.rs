//! Non-dispersive media.

use num_complex::Complex64;

use crate::provider::{MaterialError, RefractiveIndexProvider};

/// A medium whose refractive index does not depend on wavelength.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstantIndex {
    name: String,
    index: Complex64,
}

impl ConstantIndex {
    pub fn new(name: impl Into<String>, index: Complex64) -> Self {
        Self {
            name: name.into(),
            index,
        }
    }

    /// A lossless medium with real index `n`.
    pub fn real(name: impl Into<String>, n: f64) -> Self {
        Self::new(name, Complex64::new(n, 0.0))
    }

    /// Vacuum / air, n = 1.
    pub fn air() -> Self {
        Self::real("air", 1.0)
    }
}

impl RefractiveIndexProvider for ConstantIndex {
    fn name(&self) -> &str {
        &self.name
    }

    fn wavelength_range(&self) -> (f64, f64) {
        (0.0, f64::INFINITY)
    }

    fn refractive_index(&self, _wavelength_nm: f64) -> Result<Complex64, MaterialError> {
        Ok(self.index)
    }
}
