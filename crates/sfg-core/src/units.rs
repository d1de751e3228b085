//! Unit conversions between angular frequency, vacuum wavelength and
//! spectroscopic wavenumber.
//!
//! Frequencies throughout the crate are angular frequencies in rad/s, so
//! $\lambda = 2\pi c / \omega$.

use std::f64::consts::PI;

/// Speed of light in vacuum (m/s).
pub const SPEED_OF_LIGHT: f64 = 299_792_458.0;

/// Wavelength (nm) of a field with angular frequency `omega` (rad/s).
pub fn freq2wl(omega: f64) -> f64 {
    2.0 * PI * SPEED_OF_LIGHT / omega * 1e9
}

/// Angular frequency (rad/s) of a field with vacuum wavelength `wavelength_nm`.
pub fn wl2freq(wavelength_nm: f64) -> f64 {
    2.0 * PI * SPEED_OF_LIGHT / (wavelength_nm * 1e-9)
}

/// Angular frequency (rad/s) of a wavenumber given in cm⁻¹.
pub fn wavenumber2freq(wavenumber_cm: f64) -> f64 {
    2.0 * PI * SPEED_OF_LIGHT * wavenumber_cm * 1e2
}

/// Wavenumber (cm⁻¹) of an angular frequency in rad/s.
pub fn freq2wavenumber(omega: f64) -> f64 {
    omega / (2.0 * PI * SPEED_OF_LIGHT * 1e2)
}

/// Vacuum wavelength (nm) of a wavenumber in cm⁻¹.
pub fn wavenumber2wl(wavenumber_cm: f64) -> f64 {
    1e7 / wavenumber_cm
}

/// Wavenumber (cm⁻¹) of a vacuum wavelength in nm.
pub fn wl2wavenumber(wavelength_nm: f64) -> f64 {
    1e7 / wavelength_nm
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_wavelength_round_trip() {
        for &wl in &[266.0, 532.0, 800.0, 1064.0, 3400.0] {
            assert_relative_eq!(freq2wl(wl2freq(wl)), wl, max_relative = 1e-12);
        }
    }

    #[test]
    fn test_800nm_is_near_2_355e15_rad_per_s() {
        assert_relative_eq!(wl2freq(800.0), 2.354_564_5e15, max_relative = 1e-6);
    }

    #[test]
    fn test_wavenumber_matches_wavelength_path() {
        // 2900 cm⁻¹ (C-H stretch region) ≈ 3448 nm
        let omega = wavenumber2freq(2900.0);
        assert_relative_eq!(freq2wl(omega), wavenumber2wl(2900.0), max_relative = 1e-12);
        assert_relative_eq!(freq2wavenumber(omega), 2900.0, max_relative = 1e-12);
        assert_relative_eq!(wl2wavenumber(wavenumber2wl(2900.0)), 2900.0, max_relative = 1e-12);
    }
}
