//! Reflected sum-frequency intensity.
//!
//! $$I_{\text{SF}} = \frac{8\pi^3\omega^2\sec^2\beta}{c^3 n\,n_1 n_2}
//!   \left|\chi^{(2)}_{\text{eff}}\right|^2 I_1 I_2$$
//!
//! (Zhuang, Wilson and Shen, *Phys. Rev. B* **59**, 12632, 1999.)

use std::f64::consts::PI;

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::setup::Setup;
use crate::units::SPEED_OF_LIGHT;

/// Bulk refractive indices and input intensities entering the SFG intensity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntensityOptions {
    /// Index of the bulk medium at the sum frequency.
    pub n: f64,
    /// Index of the bulk medium at ω1.
    pub n1: f64,
    /// Index of the bulk medium at ω2.
    pub n2: f64,
    /// Intensity of the ω1 beam.
    pub i1: f64,
    /// Intensity of the ω2 beam.
    pub i2: f64,
}

impl Default for IntensityOptions {
    fn default() -> Self {
        Self {
            n: 1.0,
            n1: 1.0,
            n2: 1.0,
            i1: 1.0,
            i2: 1.0,
        }
    }
}

/// SFG intensity in the reflected direction.
///
/// # Arguments
/// * `omega` - Sum frequency (rad/s).
/// * `beta` - Reflection angle of the sum-frequency field.
/// * `chi_eff` - Effective susceptibility.
/// * `opts` - Bulk indices and input intensities.
pub fn sfg_intensity(omega: f64, beta: f64, chi_eff: Complex64, opts: &IntensityOptions) -> f64 {
    let sec = 1.0 / beta.cos();
    let prefactor = 8.0 * PI.powi(3) * omega * omega * sec * sec
        / (SPEED_OF_LIGHT.powi(3) * opts.n * opts.n1 * opts.n2);
    prefactor * chi_eff.norm_sqr() * opts.i1 * opts.i2
}

/// SFG intensity for a [`Setup`].
///
/// The frequency, reflection angle and bulk indices (real parts of the
/// propagation medium `n1`) come from the setup; only `i1` and `i2` are
/// read from `opts`.
pub fn sfg_intensity_for_setup(setup: &Setup, chi_eff: Complex64, opts: &IntensityOptions) -> f64 {
    let [n, n1, n2] = setup.n1().map(|c| c.re);
    let resolved = IntensityOptions { n, n1, n2, ..*opts };
    sfg_intensity(setup.omega(), setup.beta(), chi_eff, &resolved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_quadratic_in_chi_and_bilinear_in_inputs() {
        let base = sfg_intensity(1e15, 0.5, Complex64::new(1.0, 1.0), &IntensityOptions::default());
        let doubled = sfg_intensity(1e15, 0.5, Complex64::new(2.0, 2.0), &IntensityOptions::default());
        assert_relative_eq!(doubled, 4.0 * base, max_relative = 1e-12);

        let opts = IntensityOptions { i1: 3.0, i2: 5.0, ..Default::default() };
        let pumped = sfg_intensity(1e15, 0.5, Complex64::new(1.0, 1.0), &opts);
        assert_relative_eq!(pumped, 15.0 * base, max_relative = 1e-12);
    }

    #[test]
    fn test_normal_incidence_prefactor() {
        let omega = 2.0e15;
        let i = sfg_intensity(omega, 0.0, Complex64::from(1.0), &IntensityOptions::default());
        let expected = 8.0 * PI.powi(3) * omega * omega / SPEED_OF_LIGHT.powi(3);
        assert_relative_eq!(i, expected, max_relative = 1e-12);
    }

    #[test]
    fn test_setup_form_uses_propagation_medium() {
        let setup = Setup::with_real_indices((2.0e15, 1.0e15), (0.0, 0.0), (1.5, 1.4, 1.3), (1.0, 1.0, 1.0))
            .unwrap();
        let chi = Complex64::new(0.2, 0.4);
        let opts = IntensityOptions { i1: 2.0, ..Default::default() };
        let explicit = sfg_intensity(
            3.0e15,
            0.0,
            chi,
            &IntensityOptions { n: 1.5, n1: 1.4, n2: 1.3, i1: 2.0, i2: 1.0 },
        );
        assert_relative_eq!(sfg_intensity_for_setup(&setup, chi, &opts), explicit, max_relative = 1e-12);
    }
}
