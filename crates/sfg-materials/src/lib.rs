//! # SFG Materials
//!
//! Refractive-index providers for the media of an SFG setup. All materials
//! implement the [`RefractiveIndexProvider`](provider::RefractiveIndexProvider)
//! trait, which returns the complex index $\tilde{n}(\lambda)$ at a vacuum
//! wavelength in nm.
//!
//! ## Available data sources
//!
//! | Source | Module | Identifiers |
//! |--------|--------|-------------|
//! | Constant index | [`constant`] | `air` |
//! | Sellmeier (Malitson) | [`sellmeier`] | `SiO2`, `CaF2` |
//! | Tabulated (n, k) | [`tabulated`] | `water` |
//!
//! [`lookup`] resolves these identifiers (case-insensitively).

pub mod constant;
pub mod provider;
pub mod sellmeier;
pub mod spline;
pub mod tabulated;

use constant::ConstantIndex;
pub use provider::{MaterialError, RefractiveIndexProvider};
use sellmeier::Sellmeier;
use tabulated::TabulatedIndex;

/// Identifiers understood by [`lookup`].
pub const MATERIAL_IDS: [&str; 4] = ["air", "water", "SiO2", "CaF2"];

/// Resolve a built-in material by identifier.
///
/// # Errors
/// [`MaterialError::NotFound`] for unknown identifiers.
pub fn lookup(id: &str) -> Result<Box<dyn RefractiveIndexProvider>, MaterialError> {
    let provider: Box<dyn RefractiveIndexProvider> = match id.to_ascii_lowercase().as_str() {
        "air" | "vacuum" => Box::new(ConstantIndex::air()),
        "water" | "h2o" => Box::new(TabulatedIndex::water()?),
        "sio2" | "fused_silica" => Box::new(Sellmeier::fused_silica()),
        "caf2" => Box::new(Sellmeier::calcium_fluoride()),
        _ => return Err(MaterialError::NotFound(id.to_string())),
    };
    Ok(provider)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_listed_id_resolves() {
        for id in MATERIAL_IDS {
            let m = lookup(id).unwrap();
            let (lo, hi) = m.wavelength_range();
            assert!(lo < 800.0 && 800.0 < hi, "{id} should cover 800 nm");
        }
        assert!(lookup("sio2").is_ok());
    }

    #[test]
    fn test_unknown_id() {
        assert_eq!(
            lookup("unobtainium").err(),
            Some(MaterialError::NotFound("unobtainium".into()))
        );
    }
}
