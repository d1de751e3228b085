//! Interface optics: refraction, Fresnel factors and the reflected
//! sum-frequency direction.
//!
//! The Fresnel factors follow the three-layer model of Zhuang, Wilson and
//! Shen (*Phys. Rev. B* **59**, 12632, 1999): the nonlinear polarisation
//! sits in a thin interfacial layer with refractive index $n'$ between the
//! medium the beams travel in ($n_1$) and the other bulk medium ($n_2$).
//!
//! Refractive indices are complex so that absorbing media can be described;
//! all angles are in radians and measured from the surface normal.

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

/// Angle of refraction for a wave in medium `n1` hitting the interface to
/// `n2` at angle `beta`.
///
/// $\gamma = \arcsin\left(\frac{n_1 \sin\beta}{n_2}\right)$
///
/// The result is complex in general; it is real for lossless media below
/// the critical angle.
pub fn angle_of_refraction(n1: Complex64, n2: Complex64, beta: f64) -> Complex64 {
    (n1 * beta.sin() / n2).asin()
}

/// Diagonal Fresnel factor $L_{xx}$.
///
/// $L_{xx} = \frac{2 n_1 \cos\gamma}{n_1 \cos\gamma + n_2 \cos\beta}$
pub fn fresnel_x(n1: Complex64, n2: Complex64, beta: f64) -> Complex64 {
    let cos_g = angle_of_refraction(n1, n2, beta).cos();
    let cos_b = Complex64::from(beta.cos());
    2.0 * n1 * cos_g / (n1 * cos_g + n2 * cos_b)
}

/// Diagonal Fresnel factor $L_{yy}$.
///
/// $L_{yy} = \frac{2 n_1 \cos\beta}{n_1 \cos\beta + n_2 \cos\gamma}$
pub fn fresnel_y(n1: Complex64, n2: Complex64, beta: f64) -> Complex64 {
    let cos_g = angle_of_refraction(n1, n2, beta).cos();
    let cos_b = Complex64::from(beta.cos());
    2.0 * n1 * cos_b / (n1 * cos_b + n2 * cos_g)
}

/// Diagonal Fresnel factor $L_{zz}$, which also depends on the index `n_prime`
/// of the interfacial layer.
///
/// $L_{zz} = \frac{2 n_2 \cos\beta}{n_1 \cos\gamma + n_2 \cos\beta}
///   \left(\frac{n_1}{n'}\right)^2$
pub fn fresnel_z(n1: Complex64, n2: Complex64, n_prime: Complex64, beta: f64) -> Complex64 {
    let cos_g = angle_of_refraction(n1, n2, beta).cos();
    let cos_b = Complex64::from(beta.cos());
    let ratio = n1 / n_prime;
    2.0 * n2 * cos_b / (n1 * cos_g + n2 * cos_b) * ratio * ratio
}

/// Refractive index of the interfacial layer.
///
/// $\left(\frac{1}{n'}\right)^2 = \frac{4 n_2^2 + 2}{n_2^2 (n_2^2 + 5)}$
///
/// # Arguments
/// * `n2` - Index of the medium the waves are *not* propagating in.
pub fn n_interface(n2: Complex64) -> Complex64 {
    let n2_sq = n2 * n2;
    (n2_sq * (n2_sq + 5.0) / (4.0 * n2_sq + 2.0)).sqrt()
}

/// Angle of the reflected sum-frequency beam from phase matching along the
/// interface:
///
/// $\omega \sin\beta = \omega_1 \sin\beta_1 + \omega_2 \sin\beta_2$
///
/// A counter-propagating geometry is described by a negative `beta1` or
/// `beta2`.
pub fn sf_angle(omega: f64, omega1: f64, omega2: f64, beta1: f64, beta2: f64) -> f64 {
    ((omega1 * beta1.sin() + omega2 * beta2.sin()) / omega).asin()
}

/// The three diagonal Fresnel factors of one beam.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FresnelFactors {
    pub xx: Complex64,
    pub yy: Complex64,
    pub zz: Complex64,
}

impl FresnelFactors {
    /// Evaluate $L_{xx}$, $L_{yy}$ and $L_{zz}$ for a single beam.
    pub fn new(n1: Complex64, n2: Complex64, n_prime: Complex64, beta: f64) -> Self {
        Self {
            xx: fresnel_x(n1, n2, beta),
            yy: fresnel_y(n1, n2, beta),
            zz: fresnel_z(n1, n2, n_prime, beta),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::PI;

    fn c(x: f64) -> Complex64 {
        Complex64::from(x)
    }

    #[test]
    fn test_same_medium_does_not_refract() {
        for &beta in &[0.0, 0.3, 0.7, 1.2] {
            for &n in &[1.0, 1.33, 2.4] {
                let gamma = angle_of_refraction(c(n), c(n), beta);
                assert_abs_diff_eq!(gamma.re, beta, epsilon = 1e-12);
                assert_abs_diff_eq!(gamma.im, 0.0, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_snell_air_to_glass_at_45_degrees() {
        let gamma = angle_of_refraction(c(1.0), c(1.5), PI / 4.0);
        let expected = ((PI / 4.0).sin() / 1.5).asin();
        assert_abs_diff_eq!(gamma.re, expected, epsilon = 1e-12);
        assert_abs_diff_eq!(gamma.im, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_fresnel_factors_at_normal_incidence() {
        let (n1, n2) = (c(1.0), c(1.5));
        let n_p = n_interface(n2);

        let expected_xy = 2.0 * n1 / (n1 + n2);
        let expected_z = 2.0 * n2 / (n1 + n2) * (n1 / n_p) * (n1 / n_p);

        assert_abs_diff_eq!(fresnel_x(n1, n2, 0.0).re, expected_xy.re, epsilon = 1e-12);
        assert_abs_diff_eq!(fresnel_y(n1, n2, 0.0).re, expected_xy.re, epsilon = 1e-12);
        assert_abs_diff_eq!(fresnel_z(n1, n2, n_p, 0.0).re, expected_z.re, epsilon = 1e-12);
    }

    #[test]
    fn test_fresnel_factors_are_unity_without_interface() {
        let n = c(1.33);
        let factors = FresnelFactors::new(n, n, n, 0.6);
        assert_abs_diff_eq!(factors.xx.re, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(factors.yy.re, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(factors.zz.re, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_interface_index_of_vacuum_is_one() {
        assert_abs_diff_eq!(n_interface(c(1.0)).re, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_interface_index_lies_between_media() {
        // For water (1.33) the interfacial layer index lies between 1 and n2
        let n_p = n_interface(c(1.33)).re;
        assert!(n_p > 1.0 && n_p < 1.33, "n' = {}", n_p);
    }

    #[test]
    fn test_sf_angle_normal_incidence() {
        assert_abs_diff_eq!(sf_angle(3.0, 1.0, 2.0, 0.0, 0.0), 0.0, epsilon = 1e-15);
    }

    #[test]
    fn test_sf_angle_copropagating_equal_angles() {
        let beta = 50.0_f64.to_radians();
        assert_abs_diff_eq!(sf_angle(3.0, 1.0, 2.0, beta, beta), beta, epsilon = 1e-12);
    }

    #[test]
    fn test_sf_angle_counterpropagating_is_smaller() {
        let b1 = 60.0_f64.to_radians();
        let b2 = 55.0_f64.to_radians();
        let co = sf_angle(3.0, 2.0, 1.0, b1, b2);
        let counter = sf_angle(3.0, 2.0, 1.0, b1, -b2);
        assert!(counter < co);
    }
}
