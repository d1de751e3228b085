//! Tabulated (n, k) optical constants.
//!
//! The real and imaginary parts of the refractive index are interpolated
//! separately with natural cubic splines ([`CubicSpline`]). Tables can be
//! embedded (see [`TabulatedIndex::water()`]) or read from plain-text files
//! with one `wavelength_nm n k` triple per line.
//!
//! ## Available materials
//!
//! | Identifier | Constructor | Wavelength range |
//! |-----------|-------------|-----------------|
//! | `water` | [`TabulatedIndex::water()`] | 400–1000 nm |

use std::str::FromStr;

use num_complex::Complex64;

use crate::provider::{check_range, MaterialError, RefractiveIndexProvider};
use crate::spline::CubicSpline;

/// Material with spline-interpolated complex refractive index.
#[derive(Debug, Clone, PartialEq)]
pub struct TabulatedIndex {
    name: String,
    spline_n: CubicSpline,
    spline_k: CubicSpline,
}

impl TabulatedIndex {
    /// Construct from `(λ/nm, n, k)` triples sorted by wavelength.
    pub fn from_nk_table(
        name: impl Into<String>,
        table: &[(f64, f64, f64)],
    ) -> Result<Self, MaterialError> {
        let wavelengths: Vec<f64> = table.iter().map(|&(lam, _, _)| lam).collect();
        let n: Vec<f64> = table.iter().map(|&(_, n, _)| n).collect();
        let k: Vec<f64> = table.iter().map(|&(_, _, k)| k).collect();
        Ok(Self {
            name: name.into(),
            spline_n: CubicSpline::new(wavelengths.clone(), n)?,
            spline_k: CubicSpline::new(wavelengths, k)?,
        })
    }

    /// Parse a whitespace- or comma-separated `λ n k` table.
    ///
    /// Blank lines and lines starting with `#` are skipped.
    pub fn parse(name: impl Into<String>, text: &str) -> Result<Self, MaterialError> {
        let mut table = Vec::new();
        for (lineno, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let fields: Vec<&str> = line
                .split(|c: char| c == ',' || c.is_whitespace())
                .filter(|s| !s.is_empty())
                .collect();
            let [lam, n, k] = fields.as_slice() else {
                return Err(MaterialError::DataError(format!(
                    "line {}: expected 3 columns, found {}",
                    lineno + 1,
                    fields.len()
                )));
            };
            table.push((
                parse_field(lam, lineno)?,
                parse_field(n, lineno)?,
                parse_field(k, lineno)?,
            ));
        }
        Self::from_nk_table(name, &table)
    }

    /// Liquid water at room temperature (Hale and Querry, *Appl. Opt.*
    /// **12**, 555, 1973), visible and near infrared.
    pub fn water() -> Result<Self, MaterialError> {
        // (λ/nm, n, k)
        const DATA: &[(f64, f64, f64)] = &[
            (400.0, 1.339, 1.86e-9),
            (450.0, 1.337, 1.02e-9),
            (500.0, 1.335, 1.00e-9),
            (550.0, 1.333, 1.96e-9),
            (600.0, 1.332, 1.09e-8),
            (650.0, 1.331, 1.64e-8),
            (700.0, 1.331, 3.35e-8),
            (750.0, 1.330, 1.56e-7),
            (800.0, 1.329, 1.25e-7),
            (850.0, 1.329, 2.93e-7),
            (900.0, 1.328, 4.86e-7),
            (950.0, 1.327, 2.93e-6),
            (1000.0, 1.327, 2.89e-6),
        ];
        Self::from_nk_table("water (Hale & Querry)", DATA)
    }
}

fn parse_field(s: &str, lineno: usize) -> Result<f64, MaterialError> {
    f64::from_str(s).map_err(|e| {
        MaterialError::DataError(format!("line {}: cannot parse '{}': {}", lineno + 1, s, e))
    })
}

impl RefractiveIndexProvider for TabulatedIndex {
    fn name(&self) -> &str {
        &self.name
    }

    fn wavelength_range(&self) -> (f64, f64) {
        self.spline_n.domain()
    }

    fn refractive_index(&self, wavelength_nm: f64) -> Result<Complex64, MaterialError> {
        check_range(wavelength_nm, self.wavelength_range())?;
        Ok(Complex64::new(
            self.spline_n.evaluate(wavelength_nm),
            self.spline_k.evaluate(wavelength_nm).max(0.0),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_water_visible_index() {
        let water = TabulatedIndex::water().unwrap();
        assert_abs_diff_eq!(water.refractive_index(800.0).unwrap().re, 1.329, epsilon = 1e-12);
        let n = water.refractive_index(532.0).unwrap();
        assert!(n.re > 1.332 && n.re < 1.336);
        assert!(n.im >= 0.0 && n.im < 1e-6);
    }

    #[test]
    fn test_parse_table() {
        let text = "# lambda n k\n500, 1.50, 0.0\n600 1.49 0.01\n\n700\t1.48\t0.02\n";
        let m = TabulatedIndex::parse("glass", text).unwrap();
        assert_eq!(m.wavelength_range(), (500.0, 700.0));
        let n = m.refractive_index(600.0).unwrap();
        assert_abs_diff_eq!(n.re, 1.49, epsilon = 1e-12);
        assert_abs_diff_eq!(n.im, 0.01, epsilon = 1e-12);
    }

    #[test]
    fn test_parse_errors_name_the_line() {
        let err = TabulatedIndex::parse("bad", "500 1.5 0\n600 x 0\n").unwrap_err();
        assert!(err.to_string().contains("line 2"));
        assert!(TabulatedIndex::parse("short", "500 1.5\n").is_err());
    }

    #[test]
    fn test_out_of_range() {
        assert!(matches!(
            TabulatedIndex::water().unwrap().refractive_index(3400.0),
            Err(MaterialError::OutOfRange { .. })
        ));
    }
}
