//! Sellmeier dispersion formulas for transparent window materials.
//!
//! $$n^2(\lambda) = 1 + \sum_j \frac{B_j \lambda^2}{\lambda^2 - C_j}$$
//!
//! with $\lambda$ in μm. The prism materials used as SFG windows are
//! transparent across the visible and the C–H stretch region, so the index
//! returned here is real.
//!
//! ## Available materials
//!
//! | Identifier | Constructor | Wavelength range |
//! |-----------|-------------|-----------------|
//! | `SiO2` | [`Sellmeier::fused_silica()`] | 210–6700 nm |
//! | `CaF2` | [`Sellmeier::calcium_fluoride()`] | 230–9700 nm |
//!
//! Coefficients: I. H. Malitson, *J. Opt. Soc. Am.* **55**, 1205 (1965)
//! and *Appl. Opt.* **2**, 1103 (1963).

use num_complex::Complex64;

use crate::provider::{check_range, MaterialError, RefractiveIndexProvider};

/// Three-term Sellmeier material.
#[derive(Debug, Clone, PartialEq)]
pub struct Sellmeier {
    name: String,
    b: [f64; 3],
    /// Resonance wavelengths squared (μm²).
    c: [f64; 3],
    range_nm: (f64, f64),
}

impl Sellmeier {
    /// # Arguments
    /// * `b` - Oscillator strengths $B_j$.
    /// * `c` - Resonance terms $C_j$ in μm².
    /// * `range_nm` - Validity range of the fit in nm.
    pub fn new(name: impl Into<String>, b: [f64; 3], c: [f64; 3], range_nm: (f64, f64)) -> Self {
        Self {
            name: name.into(),
            b,
            c,
            range_nm,
        }
    }

    /// Fused silica (Malitson 1965).
    pub fn fused_silica() -> Self {
        Self::new(
            "SiO2 (fused silica)",
            [0.696_166_3, 0.407_942_6, 0.897_479_4],
            [0.068_404_3_f64.powi(2), 0.116_241_4_f64.powi(2), 9.896_161_f64.powi(2)],
            (210.0, 6700.0),
        )
    }

    /// Calcium fluoride (Malitson 1963).
    pub fn calcium_fluoride() -> Self {
        Self::new(
            "CaF2",
            [0.567_588_8, 0.471_091_4, 3.848_472_3],
            [0.050_263_605_f64.powi(2), 0.100_390_9_f64.powi(2), 34.649_040_f64.powi(2)],
            (230.0, 9700.0),
        )
    }

    /// $n^2$ at a wavelength in μm.
    fn n_squared(&self, lambda_um: f64) -> f64 {
        let l2 = lambda_um * lambda_um;
        1.0 + self
            .b
            .iter()
            .zip(&self.c)
            .map(|(b, c)| b * l2 / (l2 - c))
            .sum::<f64>()
    }
}

impl RefractiveIndexProvider for Sellmeier {
    fn name(&self) -> &str {
        &self.name
    }

    fn wavelength_range(&self) -> (f64, f64) {
        self.range_nm
    }

    fn refractive_index(&self, wavelength_nm: f64) -> Result<Complex64, MaterialError> {
        check_range(wavelength_nm, self.range_nm)?;
        Ok(Complex64::new(self.n_squared(wavelength_nm * 1e-3).sqrt(), 0.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_fused_silica_reference_values() {
        let silica = Sellmeier::fused_silica();
        // Sodium D line and the HeNe line.
        assert_abs_diff_eq!(silica.refractive_index(589.3).unwrap().re, 1.4585, epsilon = 2e-4);
        assert_abs_diff_eq!(silica.refractive_index(632.8).unwrap().re, 1.4570, epsilon = 2e-4);
        // C–H stretch region.
        assert_abs_diff_eq!(silica.refractive_index(3400.0).unwrap().re, 1.4088, epsilon = 2e-4);
    }

    #[test]
    fn test_calcium_fluoride_reference_values() {
        let caf2 = Sellmeier::calcium_fluoride();
        assert_abs_diff_eq!(caf2.refractive_index(589.3).unwrap().re, 1.4338, epsilon = 2e-4);
        assert_abs_diff_eq!(caf2.refractive_index(3400.0).unwrap().re, 1.4148, epsilon = 2e-4);
    }

    #[test]
    fn test_normal_dispersion() {
        let silica = Sellmeier::fused_silica();
        let blue = silica.refractive_index(450.0).unwrap().re;
        let red = silica.refractive_index(700.0).unwrap().re;
        assert!(blue > red);
    }

    #[test]
    fn test_out_of_range() {
        let caf2 = Sellmeier::calcium_fluoride();
        assert!(matches!(
            caf2.refractive_index(12_000.0),
            Err(MaterialError::OutOfRange { .. })
        ));
    }
}
