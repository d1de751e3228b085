//! Natural cubic splines for tabulated optical constants.
//!
//! Measured (n, k) tables are sparse compared to the wavelength grids of a
//! spectrum calculation; the spline gives a smooth index with continuous
//! first and second derivatives between the table entries.

use crate::provider::MaterialError;

/// Natural cubic spline through $(x_i, y_i)$.
#[derive(Debug, Clone, PartialEq)]
pub struct CubicSpline {
    xs: Vec<f64>,
    ys: Vec<f64>,
    /// Second derivatives at the knots.
    second: Vec<f64>,
}

impl CubicSpline {
    /// Fit a natural spline (zero curvature at both ends).
    ///
    /// # Errors
    /// [`MaterialError::DataError`] if the lengths differ, fewer than two
    /// points are given or `xs` is not strictly increasing.
    pub fn new(xs: Vec<f64>, ys: Vec<f64>) -> Result<Self, MaterialError> {
        if xs.len() != ys.len() {
            return Err(MaterialError::DataError(format!(
                "spline needs equal lengths, got {} knots and {} values",
                xs.len(),
                ys.len()
            )));
        }
        if xs.len() < 2 {
            return Err(MaterialError::DataError(
                "spline needs at least two points".into(),
            ));
        }
        if let Some(i) = xs.windows(2).position(|w| w[1] <= w[0]) {
            return Err(MaterialError::DataError(format!(
                "spline knots must be strictly increasing (index {})",
                i + 1
            )));
        }

        let n = xs.len();
        let mut second = vec![0.0; n];
        let mut u = vec![0.0; n];

        // Tridiagonal forward elimination
        for i in 1..n - 1 {
            let sig = (xs[i] - xs[i - 1]) / (xs[i + 1] - xs[i - 1]);
            let p = sig * second[i - 1] + 2.0;
            second[i] = (sig - 1.0) / p;
            let slope_diff =
                (ys[i + 1] - ys[i]) / (xs[i + 1] - xs[i]) - (ys[i] - ys[i - 1]) / (xs[i] - xs[i - 1]);
            u[i] = (6.0 * slope_diff / (xs[i + 1] - xs[i - 1]) - sig * u[i - 1]) / p;
        }

        for k in (1..n - 1).rev() {
            second[k] = second[k] * second[k + 1] + u[k];
        }

        Ok(Self { xs, ys, second })
    }

    /// First and last knot.
    pub fn domain(&self) -> (f64, f64) {
        (self.xs[0], self.xs[self.xs.len() - 1])
    }

    /// Evaluate the spline. Outside the knots the end polynomials are extended.
    pub fn evaluate(&self, x: f64) -> f64 {
        let n = self.xs.len();
        let hi = self.xs.partition_point(|&k| k <= x).clamp(1, n - 1);
        let lo = hi - 1;

        let h = self.xs[hi] - self.xs[lo];
        let a = (self.xs[hi] - x) / h;
        let b = (x - self.xs[lo]) / h;

        a * self.ys[lo]
            + b * self.ys[hi]
            + ((a.powi(3) - a) * self.second[lo] + (b.powi(3) - b) * self.second[hi]) * h * h / 6.0
    }
}
