//! Least-squares fitting of model spectra to measured SFG intensities.
//!
//! A Levenberg-Marquardt loop adjusts the amplitudes, positions and widths
//! of every resonance (plus the Gaussian widths of a Voigt model and the
//! background amplitude/phase, when present). Resonance phases supplied on
//! the starting model are kept fixed.
//!
//! The Jacobian is obtained by central finite differences and the damped
//! normal equations
//! $(\mathbf{J}^T\mathbf{J} + \lambda\,\mathrm{diag}(\mathbf{J}^T\mathbf{J}))\,\delta = -\mathbf{J}^T\mathbf{r}$
//! are solved with a dense LU decomposition via `faer`.

use faer::linalg::solvers::SpSolver;
use log::{debug, trace};
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

use crate::error::{SfgError, SfgResult};
use crate::spectrum::{Background, Resonances, SpectrumModel, VoigtResonances};

/// Controls for the Levenberg-Marquardt iteration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FitOptions {
    /// Maximum number of accepted or rejected steps.
    pub max_iterations: usize,
    /// Relative change of the residual sum of squares that counts as converged.
    pub tolerance: f64,
    /// Starting damping parameter λ.
    pub initial_damping: f64,
}

impl Default for FitOptions {
    fn default() -> Self {
        Self {
            max_iterations: 500,
            tolerance: 1e-12,
            initial_damping: 1e-3,
        }
    }
}

/// Outcome of [`fit_spectrum`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitResult {
    /// Model with the optimised parameters.
    pub model: SpectrumModel,
    /// Sum of squared residuals at the optimum.
    pub residual_sum_squares: f64,
    /// Iterations performed.
    pub iterations: usize,
    /// Whether the tolerance was reached before `max_iterations`.
    pub converged: bool,
    /// Whether the iteration stopped because no damped step reduced the
    /// residual any more.
    #[serde(default)]
    pub stalled: bool,
}

/// Fit `initial` to the data `(xs, ys)`.
///
/// # Errors
/// * [`SfgError::LengthMismatch`] if `xs` and `ys` differ in length.
/// * [`SfgError::Fit`] if there are no free parameters or fewer data points
///   than parameters.
pub fn fit_spectrum(
    xs: &[f64],
    ys: &[f64],
    initial: &SpectrumModel,
    opts: &FitOptions,
) -> SfgResult<FitResult> {
    if xs.len() != ys.len() {
        return Err(SfgError::LengthMismatch {
            what: "ys",
            expected: xs.len(),
            actual: ys.len(),
        });
    }

    let mut params = pack(initial);
    let p = params.len();
    if p == 0 {
        return Err(SfgError::Fit("the model has no free parameters".into()));
    }
    if xs.len() < p {
        return Err(SfgError::Fit(format!(
            "{} data points cannot determine {} parameters",
            xs.len(),
            p
        )));
    }

    let ys = Array1::from(ys.to_vec());
    let residuals = |params: &[f64]| -> SfgResult<Array1<f64>> {
        let model = unpack(initial, params)?;
        Ok(model.evaluate_grid(xs) - &ys)
    };

    let mut r = residuals(&params)?;
    let mut rss = r.dot(&r);
    let mut lambda = opts.initial_damping;
    let mut converged = rss == 0.0;
    let mut stalled = false;
    let mut iterations = 0;

    debug!("fit start: {} parameters, {} points, rss {:.6e}", p, xs.len(), rss);

    while !converged && iterations < opts.max_iterations {
        iterations += 1;

        let jac = jacobian(&residuals, &params, r.len())?;
        let jtj = jac.t().dot(&jac);
        let grad = jac.t().dot(&r);

        let delta = solve_damped(&jtj, &grad, lambda);
        let trial: Vec<f64> = params.iter().zip(delta.iter()).map(|(a, d)| a + d).collect();

        let trial_r = match delta.iter().all(|d| d.is_finite()) {
            true => residuals(&trial).ok(),
            false => None,
        };
        let trial_rss = trial_r.as_ref().map(|t| t.dot(t)).filter(|v| v.is_finite());

        match (trial_r, trial_rss) {
            (Some(tr), Some(trss)) if trss < rss => {
                let improvement = (rss - trss) / rss.max(f64::MIN_POSITIVE);
                trace!("iter {iterations}: accepted, rss {trss:.6e}, λ {lambda:.2e}");
                params = trial;
                r = tr;
                rss = trss;
                lambda = (lambda / 10.0).max(1e-15);
                if improvement < opts.tolerance || rss == 0.0 {
                    converged = true;
                    break;
                }
            }
            _ => {
                lambda *= 10.0;
                trace!("iter {iterations}: rejected, λ -> {lambda:.2e}");
                if lambda > 1e16 {
                    stalled = true;
                    break;
                }
            }
        }
    }

    debug!(
        "fit finished after {iterations} iterations, rss {rss:.6e}, converged {converged}, stalled {stalled}"
    );

    Ok(FitResult {
        model: unpack(initial, &params)?,
        residual_sum_squares: rss,
        iterations,
        converged,
        stalled,
    })
}

/// Central-difference Jacobian of the residual vector.
fn jacobian<F>(residuals: &F, params: &[f64], m: usize) -> SfgResult<Array2<f64>>
where
    F: Fn(&[f64]) -> SfgResult<Array1<f64>>,
{
    let mut jac = Array2::<f64>::zeros((m, params.len()));
    let mut shifted = params.to_vec();
    for (k, &value) in params.iter().enumerate() {
        let h = 1e-6 * value.abs().max(1e-3);
        shifted[k] = value + h;
        let plus = residuals(&shifted)?;
        shifted[k] = value - h;
        let minus = residuals(&shifted)?;
        shifted[k] = value;
        jac.column_mut(k).assign(&((plus - minus) / (2.0 * h)));
    }
    Ok(jac)
}

/// Solve the Marquardt-scaled normal equations for the step δ.
fn solve_damped(jtj: &Array2<f64>, grad: &Array1<f64>, lambda: f64) -> Vec<f64> {
    let p = grad.len();
    let a = faer::Mat::<f64>::from_fn(p, p, |i, j| {
        if i == j {
            jtj[[i, i]] + lambda * jtj[[i, i]].max(1e-12)
        } else {
            jtj[[i, j]]
        }
    });
    let rhs = faer::Col::<f64>::from_fn(p, |i| -grad[i]);
    let lu = a.partial_piv_lu();
    let step = lu.solve(&rhs);
    (0..p).map(|i| step[i]).collect()
}

/// Flatten the free parameters of a model.
fn pack(model: &SpectrumModel) -> Vec<f64> {
    let mut params = Vec::new();
    let (res, sigmas) = match model {
        SpectrumModel::Lorentzian { resonances, .. } => (resonances, None),
        SpectrumModel::Voigt { resonances, .. } => (resonances.resonances(), Some(resonances.sigmas())),
    };
    for q in 0..res.len() {
        params.extend([res.amplitudes()[q], res.positions()[q], res.widths()[q]]);
        if let Some(s) = sigmas {
            params.push(s[q]);
        }
    }
    match *model.background() {
        Background::None => {}
        Background::Real { amplitude } => params.push(amplitude),
        Background::Phased { amplitude, phase } => params.extend([amplitude, phase]),
    }
    params
}

/// Rebuild a model shaped like `template` from a parameter vector.
///
/// Widths and Gaussian sigmas enter through their magnitudes, so every
/// rebuilt model has Γ, σ ≥ 0.
fn unpack(template: &SpectrumModel, params: &[f64]) -> SfgResult<SpectrumModel> {
    let is_voigt = matches!(template, SpectrumModel::Voigt { .. });
    let template_res = template.resonances();
    let n = template_res.len();
    let stride = if is_voigt { 4 } else { 3 };

    let mut amplitudes = Vec::with_capacity(n);
    let mut positions = Vec::with_capacity(n);
    let mut widths = Vec::with_capacity(n);
    let mut sigmas = Vec::with_capacity(n);
    for chunk in params[..n * stride].chunks(stride) {
        amplitudes.push(chunk[0]);
        positions.push(chunk[1]);
        widths.push(chunk[2].abs());
        if is_voigt {
            sigmas.push(chunk[3].abs());
        }
    }

    let mut resonances = Resonances::new(amplitudes, positions, widths)?;
    if let Some(phases) = template_res.phases() {
        resonances = resonances.with_phases(phases.to_vec())?;
    }

    let rest = &params[n * stride..];
    let background = match *template.background() {
        Background::None => Background::None,
        Background::Real { .. } => Background::Real { amplitude: rest[0] },
        Background::Phased { .. } => Background::Phased {
            amplitude: rest[0],
            phase: rest[1],
        },
    };

    Ok(if is_voigt {
        SpectrumModel::Voigt {
            resonances: VoigtResonances::new(resonances, sigmas)?,
            background,
        }
    } else {
        SpectrumModel::Lorentzian { resonances, background }
    })
}
