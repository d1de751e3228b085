//! The experimental geometry of an SFG measurement.
//!
//! A [`Setup`] bundles the two input frequencies, their incidence angles
//! and the refractive indices of both bulk media at the three frequencies
//! involved. Everything else (the sum frequency, the reflected SF angle and
//! the interfacial indices) is derived once at construction.
//!
//! All per-frequency triples are ordered `[sum frequency, ω1, ω2]`.

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::error::{SfgError, SfgResult};
use crate::optics::{n_interface, sf_angle, FresnelFactors};

/// Raw inputs of a [`Setup`], used for (de)serialisation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetupSpec {
    /// Angular frequencies (ω1, ω2) in rad/s.
    pub omega: [f64; 2],
    /// Incidence angles (β1, β2) in radians.
    pub beta: [f64; 2],
    /// Indices of the medium the beams propagate in, at (ω, ω1, ω2).
    pub n1: [Complex64; 3],
    /// Indices of the other medium, at (ω, ω1, ω2).
    pub n2: [Complex64; 3],
}

/// Immutable description of an SFG experiment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SetupSpec", into = "SetupSpec")]
pub struct Setup {
    omega: [f64; 3],
    beta: [f64; 3],
    n1: [Complex64; 3],
    n2: [Complex64; 3],
    n_prime: [Complex64; 3],
}

impl Setup {
    /// Create a setup.
    ///
    /// # Arguments
    /// * `omega` - (ω1, ω2) so that ω = ω1 + ω2.
    /// * `beta` - Incidence angles for ω1 and ω2.
    /// * `n1` - Indices of the medium the beams propagate in, at (ω, ω1, ω2).
    /// * `n2` - Indices of the other medium, at (ω, ω1, ω2).
    ///
    /// # Errors
    /// [`SfgError::InvalidArgument`] if a frequency is not finite and positive.
    pub fn new(
        omega: (f64, f64),
        beta: (f64, f64),
        n1: (Complex64, Complex64, Complex64),
        n2: (Complex64, Complex64, Complex64),
    ) -> SfgResult<Self> {
        let (omega1, omega2) = omega;
        for (label, w) in [("omega1", omega1), ("omega2", omega2)] {
            if !(w.is_finite() && w > 0.0) {
                return Err(SfgError::InvalidArgument(format!(
                    "{label} must be finite and positive, got {w}"
                )));
            }
        }
        let (beta1, beta2) = beta;
        if !(beta1.is_finite() && beta2.is_finite()) {
            return Err(SfgError::InvalidArgument(format!(
                "incidence angles must be finite, got ({beta1}, {beta2})"
            )));
        }

        let omega_sf = omega1 + omega2;
        let beta_sf = sf_angle(omega_sf, omega1, omega2, beta1, beta2);
        let n1 = [n1.0, n1.1, n1.2];
        let n2 = [n2.0, n2.1, n2.2];
        let n_prime = n2.map(n_interface);

        Ok(Self {
            omega: [omega_sf, omega1, omega2],
            beta: [beta_sf, beta1, beta2],
            n1,
            n2,
            n_prime,
        })
    }

    /// Same as [`Setup::new`] with purely real refractive indices.
    pub fn with_real_indices(
        omega: (f64, f64),
        beta: (f64, f64),
        n1: (f64, f64, f64),
        n2: (f64, f64, f64),
    ) -> SfgResult<Self> {
        Self::new(
            omega,
            beta,
            (n1.0.into(), n1.1.into(), n1.2.into()),
            (n2.0.into(), n2.1.into(), n2.2.into()),
        )
    }

    /// Sum frequency ω.
    pub fn omega(&self) -> f64 {
        self.omega[0]
    }

    /// Frequencies `[ω, ω1, ω2]`.
    pub fn frequencies(&self) -> [f64; 3] {
        self.omega
    }

    /// Reflection angle of the sum-frequency beam.
    pub fn beta(&self) -> f64 {
        self.beta[0]
    }

    /// Angles `[β, β1, β2]`.
    pub fn angles(&self) -> [f64; 3] {
        self.beta
    }

    /// Indices of the propagation medium at `[ω, ω1, ω2]`.
    pub fn n1(&self) -> [Complex64; 3] {
        self.n1
    }

    /// Indices of the other medium at `[ω, ω1, ω2]`.
    pub fn n2(&self) -> [Complex64; 3] {
        self.n2
    }

    /// Interfacial-layer indices at `[ω, ω1, ω2]`.
    pub fn n_interface(&self) -> [Complex64; 3] {
        self.n_prime
    }

    /// Fresnel factors of the three beams, ordered `[ω, ω1, ω2]`.
    pub fn fresnel_factors(&self) -> [FresnelFactors; 3] {
        [0usize, 1, 2].map(|i| FresnelFactors::new(self.n1[i], self.n2[i], self.n_prime[i], self.beta[i]))
    }
}

impl TryFrom<SetupSpec> for Setup {
    type Error = SfgError;

    fn try_from(spec: SetupSpec) -> Result<Self, Self::Error> {
        Setup::new(
            (spec.omega[0], spec.omega[1]),
            (spec.beta[0], spec.beta[1]),
            (spec.n1[0], spec.n1[1], spec.n1[2]),
            (spec.n2[0], spec.n2[1], spec.n2[2]),
        )
    }
}

impl From<Setup> for SetupSpec {
    fn from(setup: Setup) -> Self {
        Self {
            omega: [setup.omega[1], setup.omega[2]],
            beta: [setup.beta[1], setup.beta[2]],
            n1: setup.n1,
            n2: setup.n2,
        }
    }
}
