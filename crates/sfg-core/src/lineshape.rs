//! Spectral lineshape primitives.
//!
//! SFG resonances are complex: a vibrational mode at $\omega_q$ with
//! damping $\Gamma_q$ contributes $A_q / (x - \omega_q - i\Gamma_q)$ to
//! the susceptibility. The Voigt variant convolves this complex
//! Lorentzian with a normalised Gaussian of width $\sigma$ (inhomogeneous
//! broadening), which has the closed form
//!
//! $$V(x) = A\,\frac{i}{\sigma}\sqrt{\frac{\pi}{2}}\;
//!   \overline{w\!\left(\frac{x - \omega + i\Gamma}{\sqrt{2}\,\sigma}\right)}$$
//!
//! with the Faddeeva function $w(z) = e^{-z^2}\operatorname{erfc}(-iz)$.

use std::f64::consts::PI;
use std::sync::OnceLock;

use num_complex::Complex64;

/// Number of terms in Weideman's rational expansion of $w(z)$.
const WEIDEMAN_TERMS: usize = 40;

/// Complex Lorentzian $A / (x - \omega - i\Gamma)$.
pub fn lorentzian(x: f64, amplitude: f64, omega: f64, gamma: f64) -> Complex64 {
    amplitude / Complex64::new(x - omega, -gamma)
}

/// Normalised Gaussian centred at `omega` with standard deviation `sigma`.
pub fn gaussian(x: f64, omega: f64, sigma: f64) -> f64 {
    let z = (x - omega) / sigma;
    (-0.5 * z * z).exp() / (sigma * (2.0 * PI).sqrt())
}

/// Complex Voigt lineshape: the complex Lorentzian convolved with
/// [`gaussian`] of width `sigma`.
///
/// Tends to [`lorentzian`] as `sigma` → 0, and is exactly it at `sigma == 0`.
pub fn voigt(x: f64, amplitude: f64, omega: f64, gamma: f64, sigma: f64) -> Complex64 {
    if sigma == 0.0 {
        return lorentzian(x, amplitude, omega, gamma);
    }
    let scale = (2.0_f64).sqrt() * sigma;
    let z = Complex64::new(x - omega, gamma) / scale;
    let prefactor = Complex64::new(0.0, (PI / 2.0).sqrt() / sigma);
    amplitude * prefactor * faddeeva(z).conj()
}

/// Area-normalised real Voigt profile with Lorentzian half width `gamma`
/// and Gaussian standard deviation `sigma`.
pub fn voigt_profile(x: f64, omega: f64, gamma: f64, sigma: f64) -> f64 {
    voigt(x, 1.0, omega, gamma, sigma).im / PI
}

/// Faddeeva function $w(z) = e^{-z^2}\operatorname{erfc}(-iz)$.
///
/// Uses Weideman's rational series (*SIAM J. Numer. Anal.* **31**, 1497,
/// 1994) in the upper half plane and the reflection
/// $w(z) = 2e^{-z^2} - w(-z)$ below it.
pub fn faddeeva(z: Complex64) -> Complex64 {
    if z.im < 0.0 {
        return 2.0 * (-z * z).exp() - faddeeva_upper(-z);
    }
    faddeeva_upper(z)
}

fn faddeeva_upper(z: Complex64) -> Complex64 {
    let coeffs = weideman_coefficients();
    let l = weideman_scale();
    let i = Complex64::i();

    let denom = l - i * z;
    let big_z = (l + i * z) / denom;

    // Horner from the highest-order coefficient
    let p = coeffs
        .iter()
        .rev()
        .fold(Complex64::from(0.0), |acc, &a| acc * big_z + a);

    2.0 * p / (denom * denom) + 1.0 / (PI.sqrt() * denom)
}

fn weideman_scale() -> f64 {
    (WEIDEMAN_TERMS as f64 / 2.0_f64.sqrt()).sqrt()
}

/// Coefficients $a_1, \dots, a_N$ of the series in ascending order.
fn weideman_coefficients() -> &'static [f64] {
    static COEFFS: OnceLock<Vec<f64>> = OnceLock::new();
    COEFFS.get_or_init(|| {
        let n = WEIDEMAN_TERMS;
        let m = 2 * n;
        let l = weideman_scale();

        // Samples of exp(-t²)(L² + t²) at t = L tan(θ/2), θ_k = kπ/M, |k| < M
        let samples: Vec<(f64, f64)> = (-(m as i64) + 1..m as i64)
            .map(|k| {
                let theta = k as f64 * PI / m as f64;
                let t = l * (theta / 2.0).tan();
                (theta, (-t * t).exp() * (l * l + t * t))
            })
            .collect();

        (1..=n)
            .map(|j| {
                let sum: f64 = samples
                    .iter()
                    .map(|&(theta, f)| f * (j as f64 * theta).cos())
                    .sum();
                sum / (2 * m) as f64
            })
            .collect()
    })
}
