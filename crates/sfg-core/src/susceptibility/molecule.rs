//! Molecular models: point group, vibrational mode and tensor elements.
//!
//! A [`Moiety`] carries exactly the parameters its (point group, mode)
//! combination needs, so an incomplete description is rejected when it is
//! built rather than when a susceptibility is requested.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::c3v;
use crate::error::{SfgError, SfgResult};
use crate::orientation::Orientation;

/// Hyperpolarizability ratios $R = \beta_{aac}/\beta_{ccc}$ of methyl groups.
pub mod reference_r {
    /// Methanol.
    pub const METHANOL: f64 = 1.7;
    /// Ethanol and longer 1-alcohols.
    pub const ETHANOL_AND_LONGER_ALCOHOLS: f64 = 3.4;
    /// Acetone.
    pub const ACETONE: f64 = 1.9;
    /// Dimethyl sulfoxide.
    pub const DMSO: f64 = 2.3;
}

/// Molecular point groups with closed-form susceptibility expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointGroup {
    C3v,
}

impl FromStr for PointGroup {
    type Err = SfgError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim_start_matches(':').to_ascii_lowercase().as_str() {
            "c3v" => Ok(Self::C3v),
            other => Err(SfgError::InvalidArgument(format!(
                "unsupported point group '{other}' (supported: c3v)"
            ))),
        }
    }
}

/// Vibrational mode of the moiety.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
    /// Symmetric stretch (`ss`).
    #[serde(rename = "ss")]
    SymmetricStretch,
    /// Asymmetric stretch (`as`).
    #[serde(rename = "as")]
    AsymmetricStretch,
}

impl FromStr for Mode {
    type Err = SfgError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim_start_matches(':').to_ascii_lowercase().as_str() {
            "ss" | "symmetric" | "symmetric_stretch" => Ok(Self::SymmetricStretch),
            "as" | "asymmetric" | "asymmetric_stretch" => Ok(Self::AsymmetricStretch),
            other => Err(SfgError::InvalidArgument(format!(
                "unsupported vibrational mode '{other}' (supported: ss, as)"
            ))),
        }
    }
}

/// Laboratory-frame tensor element $\chi_{ijk}$ (z along the surface normal).
///
/// Elements relevant for each polarization combination:
/// ssp → yyz, sps → yzy, pss → zyy, ppp → xxz, xzx, zxx and zzz.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TensorElement {
    Xxz,
    Yyz,
    Xzx,
    Zxx,
    Yzy,
    Zyy,
    Zzz,
}

impl TensorElement {
    pub const ALL: [TensorElement; 7] = [
        Self::Xxz,
        Self::Yyz,
        Self::Xzx,
        Self::Zxx,
        Self::Yzy,
        Self::Zyy,
        Self::Zzz,
    ];

    fn family(self) -> Family {
        match self {
            Self::Xxz | Self::Yyz => Family::Xxz,
            Self::Xzx | Self::Zxx | Self::Yzy | Self::Zyy => Family::Xzx,
            Self::Zzz => Family::Zzz,
        }
    }
}

impl FromStr for TensorElement {
    type Err = SfgError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim_start_matches(':').to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|e| e.to_string() == name)
            .ok_or_else(|| {
                SfgError::InvalidArgument(format!(
                    "tensor element '{name}' is not supported (supported: xxz, yyz, xzx, zxx, yzy, zyy, zzz)"
                ))
            })
    }
}

impl fmt::Display for TensorElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Xxz => "xxz",
            Self::Yyz => "yyz",
            Self::Xzx => "xzx",
            Self::Zxx => "zxx",
            Self::Yzy => "yzy",
            Self::Zyy => "zyy",
            Self::Zzz => "zzz",
        };
        f.write_str(s)
    }
}

/// Tensor elements sharing one closed-form expression.
#[derive(Debug, Clone, Copy)]
enum Family {
    Xxz,
    Xzx,
    Zzz,
}

/// Mode-specific molecular parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MoietyKind {
    /// C3v symmetric stretch with ratio `r` = β_aac/β_ccc and magnitude `beta_ccc`.
    C3vSymmetricStretch { r: f64, beta_ccc: f64 },
    /// C3v asymmetric stretch with magnitude `beta_aca` = β_bcb.
    C3vAsymmetricStretch { beta_aca: f64 },
}

/// A validated molecular model: mode parameters plus the number of oscillators N.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "MoietySpec", into = "MoietySpec")]
pub struct Moiety {
    kind: MoietyKind,
    number: f64,
}

impl Moiety {
    /// Build a moiety after checking that every parameter is finite.
    pub fn new(kind: MoietyKind, number: f64) -> SfgResult<Self> {
        let mut values = vec![("N", number)];
        match kind {
            MoietyKind::C3vSymmetricStretch { r, beta_ccc } => {
                values.extend([("R", r), ("beta", beta_ccc)]);
            }
            MoietyKind::C3vAsymmetricStretch { beta_aca } => values.push(("beta", beta_aca)),
        }
        for (name, v) in values {
            if !v.is_finite() {
                return Err(SfgError::InvalidArgument(format!(
                    "{name} must be finite, got {v}"
                )));
            }
        }
        Ok(Self { kind, number })
    }

    /// C3v symmetric stretch.
    pub fn c3v_symmetric_stretch(r: f64, beta_ccc: f64, number: f64) -> SfgResult<Self> {
        Self::new(MoietyKind::C3vSymmetricStretch { r, beta_ccc }, number)
    }

    /// C3v asymmetric stretch.
    pub fn c3v_asymmetric_stretch(beta_aca: f64, number: f64) -> SfgResult<Self> {
        Self::new(MoietyKind::C3vAsymmetricStretch { beta_aca }, number)
    }

    /// Build a moiety from loosely-typed options, as found in job files.
    ///
    /// `r` is required for the C3v symmetric stretch and ignored otherwise.
    pub fn from_options(
        point_group: PointGroup,
        mode: Mode,
        r: Option<f64>,
        beta: f64,
        number: f64,
    ) -> SfgResult<Self> {
        match (point_group, mode) {
            (PointGroup::C3v, Mode::SymmetricStretch) => {
                let r = r.ok_or_else(|| {
                    SfgError::InvalidArgument(
                        "the hyperpolarizability ratio R is required for c3v symmetric stretch"
                            .into(),
                    )
                })?;
                Self::c3v_symmetric_stretch(r, beta, number)
            }
            (PointGroup::C3v, Mode::AsymmetricStretch) => Self::c3v_asymmetric_stretch(beta, number),
        }
    }

    pub fn kind(&self) -> MoietyKind {
        self.kind
    }

    /// Number of oscillators N.
    pub fn number(&self) -> f64 {
        self.number
    }

    pub fn point_group(&self) -> PointGroup {
        PointGroup::C3v
    }

    pub fn mode(&self) -> Mode {
        match self.kind {
            MoietyKind::C3vSymmetricStretch { .. } => Mode::SymmetricStretch,
            MoietyKind::C3vAsymmetricStretch { .. } => Mode::AsymmetricStretch,
        }
    }

    /// Susceptibility element from precomputed orientation averages.
    pub fn susceptibility_from_moments(&self, element: TensorElement, mean_cos: f64, mean_cos3: f64) -> f64 {
        let (c1, c3) = (mean_cos, mean_cos3);
        let (unit, beta) = match (self.kind, element.family()) {
            (MoietyKind::C3vSymmetricStretch { r, beta_ccc }, family) => {
                let unit = match family {
                    Family::Xxz => c3v::ss_xxz(c1, c3, r),
                    Family::Xzx => c3v::ss_xzx(c1, c3, r),
                    Family::Zzz => c3v::ss_zzz(c1, c3, r),
                };
                (unit, beta_ccc)
            }
            (MoietyKind::C3vAsymmetricStretch { beta_aca }, family) => {
                let unit = match family {
                    Family::Xxz => c3v::as_xxz(c1, c3),
                    Family::Xzx => c3v::as_xzx(c1, c3),
                    Family::Zzz => c3v::as_zzz(c1, c3),
                };
                (unit, beta_aca)
            }
        };
        self.number * beta * unit
    }
}

/// Loosely-typed description of a [`Moiety`], mirroring job-file options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoietySpec {
    #[serde(default = "default_point_group")]
    pub pointgroup: PointGroup,
    pub mode: Mode,
    #[serde(default, rename = "R", skip_serializing_if = "Option::is_none")]
    pub r: Option<f64>,
    #[serde(default = "default_unity")]
    pub beta: f64,
    #[serde(default = "default_unity", rename = "N")]
    pub number: f64,
}

fn default_point_group() -> PointGroup {
    PointGroup::C3v
}

fn default_unity() -> f64 {
    1.0
}

impl TryFrom<MoietySpec> for Moiety {
    type Error = SfgError;

    fn try_from(spec: MoietySpec) -> Result<Self, Self::Error> {
        Moiety::from_options(spec.pointgroup, spec.mode, spec.r, spec.beta, spec.number)
    }
}

impl From<Moiety> for MoietySpec {
    fn from(m: Moiety) -> Self {
        let (r, beta) = match m.kind {
            MoietyKind::C3vSymmetricStretch { r, beta_ccc } => (Some(r), beta_ccc),
            MoietyKind::C3vAsymmetricStretch { beta_aca } => (None, beta_aca),
        };
        Self {
            pointgroup: m.point_group(),
            mode: m.mode(),
            r,
            beta,
            number: m.number,
        }
    }
}

/// Susceptibility element `element` of `moiety` at the given tilt orientation.
///
/// Tensor elements relevant for the polarization combinations:
/// ssp → yyz, sps → yzy, pss → zyy, ppp → xxz, xzx, zxx, zzz.
pub fn susceptibility(
    orientation: &Orientation,
    element: TensorElement,
    moiety: &Moiety,
) -> SfgResult<f64> {
    let (c1, c3) = orientation.cos_moments()?;
    Ok(moiety.susceptibility_from_moments(element, c1, c3))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_parse_tensor_elements() {
        assert_eq!("yyz".parse::<TensorElement>().unwrap(), TensorElement::Yyz);
        assert_eq!(":ZZZ".parse::<TensorElement>().unwrap(), TensorElement::Zzz);
        assert!(matches!(
            "xyz".parse::<TensorElement>(),
            Err(SfgError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_symmetric_stretch_requires_r() {
        let err = Moiety::from_options(PointGroup::C3v, Mode::SymmetricStretch, None, 1.0, 1.0);
        assert!(matches!(err, Err(SfgError::InvalidArgument(_))));
        assert!(Moiety::from_options(PointGroup::C3v, Mode::AsymmetricStretch, None, 1.0, 1.0).is_ok());
    }

    #[test]
    fn test_unknown_point_group_and_mode() {
        assert!("td".parse::<PointGroup>().is_err());
        assert!("bend".parse::<Mode>().is_err());
        assert_eq!(":as".parse::<Mode>().unwrap(), Mode::AsymmetricStretch);
    }

    #[test]
    fn test_rejects_non_finite_parameters() {
        assert!(Moiety::c3v_symmetric_stretch(f64::NAN, 1.0, 1.0).is_err());
        assert!(Moiety::c3v_asymmetric_stretch(1.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_upright_symmetric_stretch_limits() {
        let m = Moiety::c3v_symmetric_stretch(reference_r::METHANOL, 2.0, 3.0).unwrap();
        let up = Orientation::fixed(0.0);
        let nb = 6.0;
        assert_abs_diff_eq!(susceptibility(&up, TensorElement::Yyz, &m).unwrap(), nb * 1.7, epsilon = 1e-12);
        assert_abs_diff_eq!(susceptibility(&up, TensorElement::Zyy, &m).unwrap(), 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(susceptibility(&up, TensorElement::Zzz, &m).unwrap(), nb, epsilon = 1e-12);
    }

    #[test]
    fn test_in_plane_moiety_has_no_response() {
        let flat = Orientation::fixed(std::f64::consts::FRAC_PI_2);
        let ss = Moiety::c3v_symmetric_stretch(reference_r::ACETONE, 1.0, 1.0).unwrap();
        let asym = Moiety::c3v_asymmetric_stretch(1.0, 1.0).unwrap();
        for e in TensorElement::ALL {
            assert_abs_diff_eq!(susceptibility(&flat, e, &ss).unwrap(), 0.0, epsilon = 1e-15);
            assert_abs_diff_eq!(susceptibility(&flat, e, &asym).unwrap(), 0.0, epsilon = 1e-15);
        }
    }

    #[test]
    fn test_elements_in_one_family_agree() {
        let m = Moiety::c3v_asymmetric_stretch(1.0, 1.0).unwrap();
        let o = Orientation::fixed(0.6);
        let xzx = susceptibility(&o, TensorElement::Xzx, &m).unwrap();
        for e in [TensorElement::Zxx, TensorElement::Yzy, TensorElement::Zyy] {
            assert_abs_diff_eq!(susceptibility(&o, e, &m).unwrap(), xzx, epsilon = 1e-15);
        }
        let xxz = susceptibility(&o, TensorElement::Xxz, &m).unwrap();
        assert_abs_diff_eq!(susceptibility(&o, TensorElement::Yyz, &m).unwrap(), xxz, epsilon = 1e-15);
    }

    #[test]
    fn test_moiety_deserialises_with_keyword_names() {
        let json = r#"{"pointgroup":"c3v","mode":"ss","R":3.4,"beta":2.0,"N":10.0}"#;
        let m: Moiety = serde_json::from_str(json).unwrap();
        assert_eq!(
            m.kind(),
            MoietyKind::C3vSymmetricStretch { r: 3.4, beta_ccc: 2.0 }
        );
        assert_eq!(m.number(), 10.0);

        let missing_r = r#"{"mode":"ss"}"#;
        assert!(serde_json::from_str::<Moiety>(missing_r).is_err());
    }
}
