//! Model SFG spectra as coherent sums of resonances.
//!
//! $$I(x) = \left|\chi_{NR} + \sum_q \frac{A_q e^{i\varphi_q}}{x - \omega_q - i\Gamma_q}\right|^2$$
//!
//! The non-resonant background is described explicitly by [`Background`]:
//!
//! | Variant | Meaning |
//! |---------|---------|
//! | `None` | $\chi_{NR} = 0$ |
//! | `Real` | $\chi_{NR}$ is real; the relative phase of each resonance is 0 or ±π, chosen by the sign of $A_q$ |
//! | `Phased` | $\chi_{NR} e^{i\varphi_{NR}}$; a single phase belongs to the background |
//!
//! Per-resonance phases are optional on [`Resonances`]; without them all
//! $\varphi_q = 0$.

use ndarray::Array1;
use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::error::{SfgError, SfgResult};
use crate::lineshape::{lorentzian, voigt};

/// Oscillator parameters of a set of vibrational resonances.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ResonancesSpec", into = "ResonancesSpec")]
pub struct Resonances {
    amplitudes: Vec<f64>,
    positions: Vec<f64>,
    widths: Vec<f64>,
    phases: Option<Vec<f64>>,
}

/// Unvalidated [`Resonances`] fields as they appear in job files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResonancesSpec {
    /// Oscillator strengths $A_q$.
    pub amplitudes: Vec<f64>,
    /// Resonance positions $\omega_q$.
    pub positions: Vec<f64>,
    /// Damping constants $\Gamma_q$.
    pub widths: Vec<f64>,
    /// Optional phases $\varphi_q$ (radians).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phases: Option<Vec<f64>>,
}

impl Resonances {
    /// Resonances with zero phase.
    ///
    /// # Errors
    /// [`SfgError::LengthMismatch`] unless all three slices have equal length.
    pub fn new(amplitudes: Vec<f64>, positions: Vec<f64>, widths: Vec<f64>) -> SfgResult<Self> {
        let n = amplitudes.len();
        check_len("positions", n, positions.len())?;
        check_len("widths", n, widths.len())?;
        Ok(Self {
            amplitudes,
            positions,
            widths,
            phases: None,
        })
    }

    /// Attach a phase to every resonance.
    pub fn with_phases(mut self, phases: Vec<f64>) -> SfgResult<Self> {
        check_len("phases", self.len(), phases.len())?;
        self.phases = Some(phases);
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.amplitudes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.amplitudes.is_empty()
    }

    pub fn amplitudes(&self) -> &[f64] {
        &self.amplitudes
    }

    pub fn positions(&self) -> &[f64] {
        &self.positions
    }

    pub fn widths(&self) -> &[f64] {
        &self.widths
    }

    pub fn phases(&self) -> Option<&[f64]> {
        self.phases.as_deref()
    }

    fn phase_factor(&self, q: usize) -> Complex64 {
        match &self.phases {
            Some(p) => Complex64::from_polar(1.0, p[q]),
            None => Complex64::from(1.0),
        }
    }

    /// Resonant susceptibility $\sum_q A_q e^{i\varphi_q} / (x - \omega_q - i\Gamma_q)$.
    pub fn susceptibility(&self, x: f64) -> Complex64 {
        (0..self.len())
            .map(|q| {
                self.phase_factor(q)
                    * lorentzian(x, self.amplitudes[q], self.positions[q], self.widths[q])
            })
            .sum()
    }
}

impl TryFrom<ResonancesSpec> for Resonances {
    type Error = SfgError;

    fn try_from(spec: ResonancesSpec) -> Result<Self, Self::Error> {
        let r = Resonances::new(spec.amplitudes, spec.positions, spec.widths)?;
        match spec.phases {
            Some(p) => r.with_phases(p),
            None => Ok(r),
        }
    }
}

impl From<Resonances> for ResonancesSpec {
    fn from(r: Resonances) -> Self {
        Self {
            amplitudes: r.amplitudes,
            positions: r.positions,
            widths: r.widths,
            phases: r.phases,
        }
    }
}

fn check_len(what: &'static str, expected: usize, actual: usize) -> SfgResult<()> {
    if expected != actual {
        return Err(SfgError::LengthMismatch {
            what,
            expected,
            actual,
        });
    }
    Ok(())
}

/// Non-resonant background $\chi_{NR}$.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Background {
    #[default]
    None,
    /// Real background; resonance phases relative to it are set by the sign of A.
    Real { amplitude: f64 },
    /// Background with its own phase (radians).
    Phased { amplitude: f64, phase: f64 },
}

impl Background {
    /// The complex background value.
    pub fn value(&self) -> Complex64 {
        match *self {
            Self::None => Complex64::from(0.0),
            Self::Real { amplitude } => Complex64::from(amplitude),
            Self::Phased { amplitude, phase } => Complex64::from_polar(amplitude, phase),
        }
    }
}

/// Resonances broadened by a Gaussian of width $\sigma_q$ each.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "VoigtResonancesSpec", into = "VoigtResonancesSpec")]
pub struct VoigtResonances {
    resonances: Resonances,
    sigmas: Vec<f64>,
}

/// Unvalidated [`VoigtResonances`]: the Lorentzian fields plus `sigmas`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoigtResonancesSpec {
    #[serde(flatten)]
    pub resonances: ResonancesSpec,
    /// Gaussian standard deviations $\sigma_q$.
    pub sigmas: Vec<f64>,
}

impl TryFrom<VoigtResonancesSpec> for VoigtResonances {
    type Error = SfgError;

    fn try_from(spec: VoigtResonancesSpec) -> Result<Self, Self::Error> {
        VoigtResonances::new(Resonances::try_from(spec.resonances)?, spec.sigmas)
    }
}

impl From<VoigtResonances> for VoigtResonancesSpec {
    fn from(v: VoigtResonances) -> Self {
        Self {
            resonances: v.resonances.into(),
            sigmas: v.sigmas,
        }
    }
}

impl VoigtResonances {
    pub fn new(resonances: Resonances, sigmas: Vec<f64>) -> SfgResult<Self> {
        check_len("sigmas", resonances.len(), sigmas.len())?;
        Ok(Self { resonances, sigmas })
    }

    pub fn resonances(&self) -> &Resonances {
        &self.resonances
    }

    pub fn sigmas(&self) -> &[f64] {
        &self.sigmas
    }

    /// Resonant susceptibility with Voigt lineshapes.
    pub fn susceptibility(&self, x: f64) -> Complex64 {
        let r = &self.resonances;
        (0..r.len())
            .map(|q| {
                r.phase_factor(q)
                    * voigt(x, r.amplitudes[q], r.positions[q], r.widths[q], self.sigmas[q])
            })
            .sum()
    }
}

/// SFG spectrum without background: $|\sum_q A_q/(x-\omega_q-i\Gamma_q)|^2$.
pub fn sfspectrum(x: f64, resonances: &Resonances) -> f64 {
    resonances.susceptibility(x).norm_sqr()
}

/// SFG spectrum with a real non-resonant background `chi_nr`.
///
/// The relative phase between background and each resonance is 0 or ±π,
/// controlled by the sign of the resonance amplitude.
pub fn sfspectrum_with_background(x: f64, resonances: &Resonances, chi_nr: f64) -> f64 {
    sfspectrum_model(x, resonances, &Background::Real { amplitude: chi_nr })
}

/// SFG spectrum where the single phase `phase_nr` belongs to the background.
pub fn sfspectrum_with_phased_background(
    x: f64,
    resonances: &Resonances,
    chi_nr: f64,
    phase_nr: f64,
) -> f64 {
    sfspectrum_model(
        x,
        resonances,
        &Background::Phased {
            amplitude: chi_nr,
            phase: phase_nr,
        },
    )
}

/// General SFG spectrum with an explicit background description.
pub fn sfspectrum_model(x: f64, resonances: &Resonances, background: &Background) -> f64 {
    (background.value() + resonances.susceptibility(x)).norm_sqr()
}

/// SFG spectrum with Voigt-broadened resonances.
pub fn sfspectrum_voigt(x: f64, resonances: &VoigtResonances, background: &Background) -> f64 {
    (background.value() + resonances.susceptibility(x)).norm_sqr()
}

/// Resonance set with either lineshape, used by grid evaluation and fitting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "lineshape", rename_all = "snake_case")]
pub enum SpectrumModel {
    Lorentzian {
        resonances: Resonances,
        #[serde(default)]
        background: Background,
    },
    Voigt {
        resonances: VoigtResonances,
        #[serde(default)]
        background: Background,
    },
}

impl SpectrumModel {
    pub fn background(&self) -> &Background {
        match self {
            Self::Lorentzian { background, .. } | Self::Voigt { background, .. } => background,
        }
    }

    pub fn resonances(&self) -> &Resonances {
        match self {
            Self::Lorentzian { resonances, .. } => resonances,
            Self::Voigt { resonances, .. } => resonances.resonances(),
        }
    }

    /// Total complex susceptibility at `x`.
    pub fn susceptibility(&self, x: f64) -> Complex64 {
        match self {
            Self::Lorentzian { resonances, background } => background.value() + resonances.susceptibility(x),
            Self::Voigt { resonances, background } => background.value() + resonances.susceptibility(x),
        }
    }

    /// Intensity at a single point.
    pub fn evaluate(&self, x: f64) -> f64 {
        self.susceptibility(x).norm_sqr()
    }

    /// Intensity on a grid of x values.
    pub fn evaluate_grid(&self, xs: &[f64]) -> Array1<f64> {
        xs.iter().map(|&x| self.evaluate(x)).collect()
    }
}

/// `points` evenly spaced values from `start` to `end` inclusive.
pub fn linspace(start: f64, end: f64, points: usize) -> Vec<f64> {
    match points {
        0 => Vec::new(),
        1 => vec![start],
        _ => (0..points)
            .map(|i| start + (end - start) * i as f64 / (points - 1) as f64)
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use std::f64::consts::PI;

    fn methyl_pair() -> Resonances {
        Resonances::new(vec![1.0, 1.0], vec![2880.0, 2930.0], vec![8.0, 7.0]).unwrap()
    }

    #[test]
    fn test_single_resonance_peak_height() {
        let r = Resonances::new(vec![3.0], vec![2900.0], vec![5.0]).unwrap();
        assert_relative_eq!(sfspectrum(2900.0, &r), (3.0_f64 / 5.0).powi(2), max_relative = 1e-14);
    }

    #[test]
    fn test_single_resonance_lorentzian_form() {
        let r = Resonances::new(vec![2.0], vec![2900.0], vec![4.0]).unwrap();
        let x = 2910.0;
        let expected = 4.0 / ((x - 2900.0_f64).powi(2) + 16.0);
        assert_relative_eq!(sfspectrum(x, &r), expected, max_relative = 1e-14);
    }

    #[test]
    fn test_length_mismatch_is_rejected() {
        let err = Resonances::new(vec![1.0, 1.0], vec![2880.0], vec![8.0, 7.0]);
        assert_eq!(
            err,
            Err(SfgError::LengthMismatch { what: "positions", expected: 2, actual: 1 })
        );
        assert!(methyl_pair().with_phases(vec![0.0]).is_err());
    }

    #[test]
    fn test_sign_of_amplitude_sets_interference_with_real_background() {
        // Below resonance the real part of A/(x-ω-iΓ) is negative for A > 0,
        // so a positive background interferes destructively there.
        let pos = Resonances::new(vec![1.0], vec![2900.0], vec![5.0]).unwrap();
        let neg = Resonances::new(vec![-1.0], vec![2900.0], vec![5.0]).unwrap();
        let x = 2890.0;
        let with_pos = sfspectrum_with_background(x, &pos, 0.05);
        let with_neg = sfspectrum_with_background(x, &neg, 0.05);
        assert!(with_pos < sfspectrum(x, &pos));
        assert!(with_neg > sfspectrum(x, &neg));
    }

    #[test]
    fn test_background_phase_pi_equals_negated_real_background() {
        let r = methyl_pair();
        for &x in &[2850.0, 2900.0, 2950.0] {
            let phased = sfspectrum_with_phased_background(x, &r, 0.1, PI);
            let real = sfspectrum_with_background(x, &r, -0.1);
            assert_relative_eq!(phased, real, max_relative = 1e-12);
        }
    }

    #[test]
    fn test_resonance_phase_pi_flips_amplitude_sign() {
        let flipped = Resonances::new(vec![1.0], vec![2900.0], vec![5.0])
            .unwrap()
            .with_phases(vec![PI])
            .unwrap();
        let negative = Resonances::new(vec![-1.0], vec![2900.0], vec![5.0]).unwrap();
        let x = 2893.0;
        assert_relative_eq!(
            sfspectrum_with_background(x, &flipped, 0.2),
            sfspectrum_with_background(x, &negative, 0.2),
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_zero_damping_on_resonance_is_not_finite() {
        let r = Resonances::new(vec![1.0], vec![2900.0], vec![0.0]).unwrap();
        assert!(!sfspectrum(2900.0, &r).is_finite());
    }

    #[test]
    fn test_voigt_spectrum_approaches_lorentzian() {
        let r = methyl_pair();
        let v = VoigtResonances::new(r.clone(), vec![0.01, 0.01]).unwrap();
        for &x in &[2870.0, 2905.0, 2940.0] {
            assert_relative_eq!(
                sfspectrum_voigt(x, &v, &Background::None),
                sfspectrum(x, &r),
                max_relative = 1e-4
            );
        }
    }

    #[test]
    fn test_grid_evaluation_matches_pointwise() {
        let model = SpectrumModel::Lorentzian {
            resonances: methyl_pair(),
            background: Background::Real { amplitude: 0.02 },
        };
        let xs = linspace(2800.0, 3000.0, 201);
        let ys = model.evaluate_grid(&xs);
        assert_eq!(ys.len(), 201);
        assert_abs_diff_eq!(ys[80], sfspectrum_with_background(xs[80], &methyl_pair(), 0.02), epsilon = 1e-15);
    }

    #[test]
    fn test_linspace_endpoints() {
        let xs = linspace(2800.0, 3000.0, 5);
        assert_eq!(xs, vec![2800.0, 2850.0, 2900.0, 2950.0, 3000.0]);
        assert!(linspace(0.0, 1.0, 0).is_empty());
    }

    #[test]
    fn test_model_deserialises_from_json() {
        let json = r#"{
            "lineshape": "lorentzian",
            "resonances": {"amplitudes": [1.0], "positions": [2880.0], "widths": [8.0]},
            "background": {"type": "phased", "amplitude": 0.1, "phase": 1.0}
        }"#;
        let model: SpectrumModel = serde_json::from_str(json).unwrap();
        assert_eq!(model.resonances().len(), 1);
        assert_eq!(*model.background(), Background::Phased { amplitude: 0.1, phase: 1.0 });

        let bad = r#"{"lineshape": "lorentzian",
            "resonances": {"amplitudes": [1.0, 2.0], "positions": [2880.0], "widths": [8.0]}}"#;
        assert!(serde_json::from_str::<SpectrumModel>(bad).is_err());
    }
}
