//! Effective second-order susceptibilities.
//!
//! The effective susceptibility of a polarization combination contracts
//! the laboratory-frame tensor $\chi_{ijk}$ with the Fresnel factors of
//! the three beams and their projection onto the surface frame (Wang et
//! al., *Int. Rev. Phys. Chem.* **24**, 191, 2005):
//!
//! $$\chi_{\text{eff},ssp} = L_{yy}(\omega) L_{yy}(\omega_1) L_{zz}(\omega_2) \sin\beta_2\,\chi_{yyz}$$
//!
//! Polarizations are written in the order (sum frequency, ω1, ω2). Every
//! per-beam array passed here is ordered `[ω, ω1, ω2]` as well.

pub mod c3v;
pub mod molecule;

use std::fmt;
use std::str::FromStr;

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::error::{SfgError, SfgResult};
use crate::optics::FresnelFactors;
use crate::orientation::Orientation;
use crate::setup::Setup;

pub use molecule::{
    reference_r, susceptibility, Mode, Moiety, MoietyKind, MoietySpec, PointGroup, TensorElement,
};

/// Polarization combination (sum frequency, ω1, ω2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Polarization {
    Ssp,
    Sps,
    Pss,
    Ppp,
}

impl Polarization {
    pub const ALL: [Polarization; 4] = [Self::Ssp, Self::Sps, Self::Pss, Self::Ppp];

    /// Tensor elements contributing to this polarization combination.
    pub fn tensor_elements(self) -> &'static [TensorElement] {
        match self {
            Self::Ssp => &[TensorElement::Yyz],
            Self::Sps => &[TensorElement::Yzy],
            Self::Pss => &[TensorElement::Zyy],
            Self::Ppp => &[
                TensorElement::Xxz,
                TensorElement::Xzx,
                TensorElement::Zxx,
                TensorElement::Zzz,
            ],
        }
    }
}

impl FromStr for Polarization {
    type Err = SfgError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim_start_matches(':').to_ascii_lowercase().as_str() {
            "ssp" => Ok(Self::Ssp),
            "sps" => Ok(Self::Sps),
            "pss" => Ok(Self::Pss),
            "ppp" => Ok(Self::Ppp),
            other => Err(SfgError::InvalidArgument(format!(
                "unknown polarization combination '{other}' (supported: ssp, sps, pss, ppp)"
            ))),
        }
    }
}

impl fmt::Display for Polarization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Ssp => "ssp",
            Self::Sps => "sps",
            Self::Pss => "pss",
            Self::Ppp => "ppp",
        };
        f.write_str(s)
    }
}

/// Non-vanishing elements of an azimuthally isotropic $\chi^{(2)}$ tensor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TensorComponents {
    pub xxz: Complex64,
    pub yyz: Complex64,
    pub xzx: Complex64,
    pub zxx: Complex64,
    pub yzy: Complex64,
    pub zyy: Complex64,
    pub zzz: Complex64,
}

impl TensorComponents {
    pub fn get(&self, element: TensorElement) -> Complex64 {
        match element {
            TensorElement::Xxz => self.xxz,
            TensorElement::Yyz => self.yyz,
            TensorElement::Xzx => self.xzx,
            TensorElement::Zxx => self.zxx,
            TensorElement::Yzy => self.yzy,
            TensorElement::Zyy => self.zyy,
            TensorElement::Zzz => self.zzz,
        }
    }

    pub fn set(&mut self, element: TensorElement, value: Complex64) {
        let slot = match element {
            TensorElement::Xxz => &mut self.xxz,
            TensorElement::Yyz => &mut self.yyz,
            TensorElement::Xzx => &mut self.xzx,
            TensorElement::Zxx => &mut self.zxx,
            TensorElement::Yzy => &mut self.yzy,
            TensorElement::Zyy => &mut self.zyy,
            TensorElement::Zzz => &mut self.zzz,
        };
        *slot = value;
    }

    /// The ppp inputs in the order `[χ_xxz, χ_xzx, χ_zxx, χ_zzz]`.
    pub fn ppp(&self) -> [Complex64; 4] {
        [self.xxz, self.xzx, self.zxx, self.zzz]
    }
}

fn factors(
    n1: &[Complex64; 3],
    n2: &[Complex64; 3],
    n_prime: &[Complex64; 3],
    beta: &[f64; 3],
) -> [FresnelFactors; 3] {
    [0usize, 1, 2].map(|i| FresnelFactors::new(n1[i], n2[i], n_prime[i], beta[i]))
}

fn ssp(l: &[FresnelFactors; 3], beta: &[f64; 3], chi_yyz: Complex64) -> Complex64 {
    l[0].yy * l[1].yy * l[2].zz * beta[2].sin() * chi_yyz
}

fn sps(l: &[FresnelFactors; 3], beta: &[f64; 3], chi_yzy: Complex64) -> Complex64 {
    l[0].yy * l[1].zz * l[2].yy * beta[1].sin() * chi_yzy
}

fn pss(l: &[FresnelFactors; 3], beta: &[f64; 3], chi_zyy: Complex64) -> Complex64 {
    l[0].zz * l[1].yy * l[2].yy * beta[0].sin() * chi_zyy
}

fn ppp(l: &[FresnelFactors; 3], beta: &[f64; 3], chi: &[Complex64; 4]) -> Complex64 {
    let (s, c) = (beta.map(f64::sin), beta.map(f64::cos));
    let [xxz, xzx, zxx, zzz] = *chi;

    -l[0].xx * l[1].xx * l[2].zz * c[0] * c[1] * s[2] * xxz
        - l[0].xx * l[1].zz * l[2].xx * c[0] * s[1] * c[2] * xzx
        + l[0].zz * l[1].xx * l[2].xx * s[0] * c[1] * c[2] * zxx
        + l[0].zz * l[1].zz * l[2].zz * s[0] * s[1] * s[2] * zzz
}

/// Effective susceptibility in ssp polarization.
///
/// # Arguments
/// * `n1` - Indices of the medium the waves propagate in.
/// * `n2` - Indices of the other medium.
/// * `n_prime` - Indices of the interfacial layer (only ω2 enters via $L_{zz}$).
/// * `beta` - Incident or reflected angles.
/// * `chi_yyz` - Susceptibility element $\chi_{yyz}$.
pub fn effective_susceptibility_ssp(
    n1: &[Complex64; 3],
    n2: &[Complex64; 3],
    n_prime: &[Complex64; 3],
    beta: &[f64; 3],
    chi_yyz: Complex64,
) -> Complex64 {
    ssp(&factors(n1, n2, n_prime, beta), beta, chi_yyz)
}

/// Effective susceptibility in sps polarization from $\chi_{yzy}$.
pub fn effective_susceptibility_sps(
    n1: &[Complex64; 3],
    n2: &[Complex64; 3],
    n_prime: &[Complex64; 3],
    beta: &[f64; 3],
    chi_yzy: Complex64,
) -> Complex64 {
    sps(&factors(n1, n2, n_prime, beta), beta, chi_yzy)
}

/// Effective susceptibility in pss polarization from $\chi_{zyy}$.
pub fn effective_susceptibility_pss(
    n1: &[Complex64; 3],
    n2: &[Complex64; 3],
    n_prime: &[Complex64; 3],
    beta: &[f64; 3],
    chi_zyy: Complex64,
) -> Complex64 {
    pss(&factors(n1, n2, n_prime, beta), beta, chi_zyy)
}

/// Effective susceptibility in ppp polarization.
///
/// `chi` holds $[\chi_{xxz}, \chi_{xzx}, \chi_{zxx}, \chi_{zzz}]$.
pub fn effective_susceptibility_ppp(
    n1: &[Complex64; 3],
    n2: &[Complex64; 3],
    n_prime: &[Complex64; 3],
    beta: &[f64; 3],
    chi: &[Complex64; 4],
) -> Complex64 {
    ppp(&factors(n1, n2, n_prime, beta), beta, chi)
}

impl Setup {
    /// ssp effective susceptibility for this setup.
    pub fn effective_susceptibility_ssp(&self, chi_yyz: Complex64) -> Complex64 {
        ssp(&self.fresnel_factors(), &self.angles(), chi_yyz)
    }

    /// sps effective susceptibility for this setup.
    pub fn effective_susceptibility_sps(&self, chi_yzy: Complex64) -> Complex64 {
        sps(&self.fresnel_factors(), &self.angles(), chi_yzy)
    }

    /// pss effective susceptibility for this setup.
    pub fn effective_susceptibility_pss(&self, chi_zyy: Complex64) -> Complex64 {
        pss(&self.fresnel_factors(), &self.angles(), chi_zyy)
    }

    /// ppp effective susceptibility for this setup, `chi` as `[χ_xxz, χ_xzx, χ_zxx, χ_zzz]`.
    pub fn effective_susceptibility_ppp(&self, chi: &[Complex64; 4]) -> Complex64 {
        ppp(&self.fresnel_factors(), &self.angles(), chi)
    }

    /// Effective susceptibility of `polarization` for a full set of tensor components.
    pub fn effective_susceptibility(
        &self,
        polarization: Polarization,
        chi: &TensorComponents,
    ) -> Complex64 {
        let l = self.fresnel_factors();
        let beta = self.angles();
        match polarization {
            Polarization::Ssp => ssp(&l, &beta, chi.yyz),
            Polarization::Sps => sps(&l, &beta, chi.yzy),
            Polarization::Pss => pss(&l, &beta, chi.zyy),
            Polarization::Ppp => ppp(&l, &beta, &chi.ppp()),
        }
    }
}

/// Effective susceptibility of a moiety with the given tilt orientation.
///
/// The laboratory-frame elements needed by `polarization` are obtained from
/// [`susceptibility`] and contracted with the Fresnel factors of `setup`.
/// For a tilt distribution the orientation averages are taken over the
/// distribution before contraction.
pub fn effective_susceptibility(
    orientation: &Orientation,
    setup: &Setup,
    polarization: Polarization,
    moiety: &Moiety,
) -> SfgResult<Complex64> {
    let (c1, c3) = orientation.cos_moments()?;
    let mut chi = TensorComponents::default();
    for &element in polarization.tensor_elements() {
        let value = moiety.susceptibility_from_moments(element, c1, c3);
        chi.set(element, Complex64::from(value));
    }
    Ok(setup.effective_susceptibility(polarization, &chi))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn air_water() -> Setup {
        Setup::with_real_indices(
            (crate::units::wl2freq(800.0), crate::units::wl2freq(3400.0)),
            (45_f64.to_radians(), 55_f64.to_radians()),
            (1.0, 1.0, 1.0),
            (1.34, 1.33, 1.41),
        )
        .unwrap()
    }

    #[test]
    fn test_polarization_parsing() {
        assert_eq!(":ssp".parse::<Polarization>().unwrap(), Polarization::Ssp);
        assert_eq!("PPP".parse::<Polarization>().unwrap(), Polarization::Ppp);
        assert!("spp".parse::<Polarization>().is_err());
        for p in Polarization::ALL {
            assert_eq!(p.to_string().parse::<Polarization>().unwrap(), p);
        }
    }

    #[test]
    fn test_setup_forms_match_array_forms() {
        let s = air_water();
        let chi = Complex64::new(0.3, -0.1);
        let (n1, n2, np, b) = (s.n1(), s.n2(), s.n_interface(), s.angles());

        let a = effective_susceptibility_ssp(&n1, &n2, &np, &b, chi);
        let c = s.effective_susceptibility_ssp(chi);
        assert_abs_diff_eq!(a.re, c.re, epsilon = 1e-15);
        assert_abs_diff_eq!(a.im, c.im, epsilon = 1e-15);

        let chi4 = [chi, 2.0 * chi, -chi, Complex64::new(0.0, 1.0)];
        let a = effective_susceptibility_ppp(&n1, &n2, &np, &b, &chi4);
        let c = s.effective_susceptibility_ppp(&chi4);
        assert_abs_diff_eq!((a - c).norm(), 0.0, epsilon = 1e-15);
    }

    #[test]
    fn test_effective_susceptibility_is_linear_in_chi() {
        let s = air_water();
        let k = Complex64::new(2.5, 0.7);
        let chi = Complex64::new(1.0, 0.2);
        let chi4 = [chi, -0.5 * chi, 0.25 * chi, Complex64::new(0.3, 0.0)];
        let scaled4 = chi4.map(|c| k * c);

        let pairs = [
            (s.effective_susceptibility_ssp(k * chi), k * s.effective_susceptibility_ssp(chi)),
            (s.effective_susceptibility_sps(k * chi), k * s.effective_susceptibility_sps(chi)),
            (s.effective_susceptibility_pss(k * chi), k * s.effective_susceptibility_pss(chi)),
            (s.effective_susceptibility_ppp(&scaled4), k * s.effective_susceptibility_ppp(&chi4)),
        ];
        for (lhs, rhs) in pairs {
            assert_abs_diff_eq!((lhs - rhs).norm(), 0.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_ppp_at_normal_incidence_has_no_z_projection() {
        // All sines vanish: only the xxz term survives, and it needs sin β2 too.
        let n = [Complex64::from(1.0); 3];
        let chi4 = [Complex64::from(1.0); 4];
        let v = effective_susceptibility_ppp(&n, &n, &n, &[0.0; 3], &chi4);
        assert_abs_diff_eq!(v.norm(), 0.0, epsilon = 1e-15);
    }

    #[test]
    fn test_ssp_without_interface_is_geometric_projection() {
        let n = [Complex64::from(1.0); 3];
        let beta = [0.3, 0.4, 0.5];
        let v = effective_susceptibility_ssp(&n, &n, &n, &beta, Complex64::from(2.0));
        assert_abs_diff_eq!(v.re, 2.0 * 0.5_f64.sin(), epsilon = 1e-12);
    }

    const BETA: [f64; 3] = [0.7, 0.5, 1.1];

    fn unit_indices() -> [Complex64; 3] {
        [Complex64::from(1.0); 3]
    }

    #[test]
    fn test_sps_projects_on_visible_beam() {
        let n = unit_indices();
        let v = effective_susceptibility_sps(&n, &n, &n, &BETA, Complex64::from(1.0));
        assert_abs_diff_eq!(v.re, BETA[1].sin(), epsilon = 1e-12);
        assert_abs_diff_eq!(v.im, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_pss_projects_on_sum_frequency_beam() {
        let n = unit_indices();
        let v = effective_susceptibility_pss(&n, &n, &n, &BETA, Complex64::from(1.0));
        assert_abs_diff_eq!(v.re, BETA[0].sin(), epsilon = 1e-12);
        assert_abs_diff_eq!(v.im, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_ppp_term_signs_without_interface() {
        let n = unit_indices();
        let (s, c) = (BETA.map(f64::sin), BETA.map(f64::cos));
        // [xxz, xzx, zxx, zzz], each switched on alone
        let expected = [
            -c[0] * c[1] * s[2],
            -c[0] * s[1] * c[2],
            s[0] * c[1] * c[2],
            s[0] * s[1] * s[2],
        ];
        for (k, want) in expected.into_iter().enumerate() {
            let mut chi = [Complex64::from(0.0); 4];
            chi[k] = Complex64::from(1.0);
            let v = effective_susceptibility_ppp(&n, &n, &n, &BETA, &chi);
            assert_abs_diff_eq!(v.re, want, epsilon = 1e-12);
            assert_abs_diff_eq!(v.im, 0.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_moiety_entry_point_matches_manual_contraction() {
        let s = air_water();
        let m = Moiety::c3v_symmetric_stretch(1.7, 1.0, 1.0).unwrap();
        let theta = 30_f64.to_radians();
        let o = Orientation::fixed(theta);

        let chi_yyz = susceptibility(&o, TensorElement::Yyz, &m).unwrap();
        let expected = s.effective_susceptibility_ssp(Complex64::from(chi_yyz));
        let got = effective_susceptibility(&o, &s, Polarization::Ssp, &m).unwrap();
        assert_abs_diff_eq!((got - expected).norm(), 0.0, epsilon = 1e-15);
    }
}
