//! Tilt-angle orientation of a molecular moiety.
//!
//! The susceptibility of an ensemble depends on the tilt angle θ between
//! the moiety's symmetry axis and the surface normal only through the
//! orientation averages $\langle\cos\theta\rangle$ and
//! $\langle\cos^3\theta\rangle$. An [`Orientation`] is either a single
//! fixed angle or a probability distribution of angles; distribution
//! averages are evaluated by quadrature over $[0, \pi]$ and renormalised
//! by the probability mass that falls inside that interval.

use std::f64::consts::PI;

use log::trace;
use serde::{Deserialize, Serialize};

use crate::error::{SfgError, SfgResult};
use crate::quadrature;

/// Quadrature panels used for distribution averages.
const PANELS: usize = 128;

/// Half-width of the integration window of a normal distribution, in
/// standard deviations.
const NORMAL_WINDOW: f64 = 8.0;

/// Tilt angle (radians) of the moiety's symmetry axis from the surface normal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Orientation {
    /// Every moiety has the same tilt angle.
    Fixed { theta: f64 },
    /// Normally distributed tilt angles.
    Normal { mean: f64, std_dev: f64 },
    /// Tilt angles uniformly distributed on `[low, high]`.
    Uniform { low: f64, high: f64 },
}

impl Orientation {
    /// Fixed tilt angle in radians.
    pub fn fixed(theta: f64) -> Self {
        Self::Fixed { theta }
    }

    /// Check that the parameters describe a proper distribution with mass in `[0, π]`.
    pub fn validate(&self) -> SfgResult<()> {
        match *self {
            Self::Fixed { theta } => {
                if !theta.is_finite() {
                    return Err(SfgError::InvalidArgument(format!(
                        "tilt angle must be finite, got {theta}"
                    )));
                }
            }
            Self::Normal { mean, std_dev } => {
                if !(mean.is_finite() && std_dev.is_finite() && std_dev > 0.0) {
                    return Err(SfgError::InvalidArgument(format!(
                        "normal tilt distribution needs a finite mean and positive std_dev, got ({mean}, {std_dev})"
                    )));
                }
            }
            Self::Uniform { low, high } => {
                if !(low.is_finite() && high.is_finite() && low < high) {
                    return Err(SfgError::InvalidArgument(format!(
                        "uniform tilt distribution needs low < high, got [{low}, {high}]"
                    )));
                }
            }
        }
        let (a, b) = self.window();
        if !matches!(self, Self::Fixed { .. }) && a >= b {
            return Err(SfgError::InvalidArgument(format!(
                "tilt distribution {self:?} has no support in [0, π]"
            )));
        }
        Ok(())
    }

    /// Unnormalised probability density at `theta`.
    fn density(&self, theta: f64) -> f64 {
        match *self {
            Self::Fixed { .. } => 0.0,
            Self::Normal { mean, std_dev } => {
                let z = (theta - mean) / std_dev;
                (-0.5 * z * z).exp()
            }
            Self::Uniform { low, high } => {
                if (low..=high).contains(&theta) {
                    1.0
                } else {
                    0.0
                }
            }
        }
    }

    /// Integration window: the distribution's support clipped to `[0, π]`.
    fn window(&self) -> (f64, f64) {
        let (lo, hi) = match *self {
            Self::Fixed { theta } => return (theta, theta),
            Self::Normal { mean, std_dev } => (
                mean - NORMAL_WINDOW * std_dev,
                mean + NORMAL_WINDOW * std_dev,
            ),
            Self::Uniform { low, high } => (low, high),
        };
        (lo.max(0.0), hi.min(PI))
    }

    /// Expectation $\langle f(\theta) \rangle$ over this orientation.
    pub fn average<F: Fn(f64) -> f64>(&self, f: F) -> SfgResult<f64> {
        self.validate()?;
        if let Self::Fixed { theta } = *self {
            return Ok(f(theta));
        }
        let (a, b) = self.window();

        let mass = quadrature::integrate(|t| self.density(t), a, b, PANELS);
        if !(mass > 0.0) {
            return Err(SfgError::InvalidArgument(format!(
                "tilt distribution {self:?} has vanishing probability in [0, π]"
            )));
        }
        let weighted = quadrature::integrate(|t| self.density(t) * f(t), a, b, PANELS);
        trace!("orientation average over [{a:.4}, {b:.4}] rad, mass {mass:.6e}");
        Ok(weighted / mass)
    }

    /// Orientation averages $(\langle\cos\theta\rangle, \langle\cos^3\theta\rangle)$.
    pub fn cos_moments(&self) -> SfgResult<(f64, f64)> {
        let c1 = self.average(f64::cos)?;
        let c3 = self.average(|t| t.cos().powi(3))?;
        Ok((c1, c3))
    }
}

impl From<f64> for Orientation {
    fn from(theta: f64) -> Self {
        Self::fixed(theta)
    }
}
