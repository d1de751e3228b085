//! Orientation-averaged susceptibility of a C∞v/C3v moiety (e.g. CH₃).
//!
//! Each function returns $\chi_{ijk} / (N\beta)$ from the orientation
//! averages $\langle\cos\theta\rangle$ and $\langle\cos^3\theta\rangle$;
//! $\beta$ is $\beta_{ccc}$ for the symmetric stretch and
//! $\beta_{aca} = \beta_{bcb}$ for the asymmetric stretch.
//!
//! Reference: Wang, Gan, Lu, Rao and Wu, *Int. Rev. Phys. Chem.* **24**,
//! 191 (2005), <https://doi.org/10.1080/01442350500225894>.

/// Symmetric stretch, tensor elements xxz and yyz.
///
/// $\tfrac12\left[\langle\cos\theta\rangle(1+R) - \langle\cos^3\theta\rangle(1-R)\right]$
pub fn ss_xxz(mean_cos: f64, mean_cos3: f64, r: f64) -> f64 {
    0.5 * (mean_cos * (1.0 + r) - mean_cos3 * (1.0 - r))
}

/// Symmetric stretch, tensor elements xzx, zxx, yzy and zyy.
///
/// $\tfrac12\left(\langle\cos\theta\rangle - \langle\cos^3\theta\rangle\right)(1-R)$
pub fn ss_xzx(mean_cos: f64, mean_cos3: f64, r: f64) -> f64 {
    0.5 * (mean_cos - mean_cos3) * (1.0 - r)
}

/// Symmetric stretch, tensor element zzz.
///
/// $R\langle\cos\theta\rangle + \langle\cos^3\theta\rangle(1-R)$
pub fn ss_zzz(mean_cos: f64, mean_cos3: f64, r: f64) -> f64 {
    r * mean_cos + mean_cos3 * (1.0 - r)
}

/// Asymmetric stretch, tensor elements xxz and yyz.
pub fn as_xxz(mean_cos: f64, mean_cos3: f64) -> f64 {
    -(mean_cos - mean_cos3)
}

/// Asymmetric stretch, tensor elements xzx, zxx, yzy and zyy.
pub fn as_xzx(_mean_cos: f64, mean_cos3: f64) -> f64 {
    mean_cos3
}

/// Asymmetric stretch, tensor element zzz.
pub fn as_zzz(mean_cos: f64, mean_cos3: f64) -> f64 {
    2.0 * (mean_cos - mean_cos3)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const R: f64 = 1.7;

    #[test]
    fn test_upright_moiety() {
        // θ = 0: ⟨cos θ⟩ = ⟨cos³ θ⟩ = 1
        assert_abs_diff_eq!(ss_xxz(1.0, 1.0, R), R, epsilon = 1e-15);
        assert_abs_diff_eq!(ss_xzx(1.0, 1.0, R), 0.0, epsilon = 1e-15);
        assert_abs_diff_eq!(ss_zzz(1.0, 1.0, R), 1.0, epsilon = 1e-15);
        assert_abs_diff_eq!(as_xxz(1.0, 1.0), 0.0, epsilon = 1e-15);
        assert_abs_diff_eq!(as_xzx(1.0, 1.0), 1.0, epsilon = 1e-15);
        assert_abs_diff_eq!(as_zzz(1.0, 1.0), 0.0, epsilon = 1e-15);
    }

    #[test]
    fn test_flat_lying_moiety_has_no_response() {
        let c = 90_f64.to_radians().cos();
        let c3 = c.powi(3);
        for v in [
            ss_xxz(c, c3, R),
            ss_xzx(c, c3, R),
            ss_zzz(c, c3, R),
            as_xxz(c, c3),
            as_xzx(c, c3),
            as_zzz(c, c3),
        ] {
            assert_abs_diff_eq!(v, 0.0, epsilon = 1e-15);
        }
    }

    #[test]
    fn test_r_equal_one_makes_symmetric_stretch_isotropic() {
        // With R = 1 the polarisability is isotropic: xzx vanishes and xxz = zzz
        let theta = 0.8_f64;
        let (c, c3) = (theta.cos(), theta.cos().powi(3));
        assert_abs_diff_eq!(ss_xzx(c, c3, 1.0), 0.0, epsilon = 1e-15);
        assert_abs_diff_eq!(ss_xxz(c, c3, 1.0), ss_zzz(c, c3, 1.0), epsilon = 1e-15);
    }
}
