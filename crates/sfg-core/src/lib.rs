//! # SFG Core
//!
//! Formula library for the analysis of vibrational sum-frequency generation
//! (SFG) spectra of interfaces. Given an experimental [`setup::Setup`], a
//! molecular model ([`susceptibility::Moiety`]) and a tilt
//! [`orientation::Orientation`], the crate computes Fresnel factors,
//! effective susceptibilities for the four polarization combinations, SFG
//! intensities and model spectra, and fits spectra to measured data.
//!
//! ## Conventions
//!
//! Frequencies are angular frequencies in rad/s unless a function name says
//! otherwise (see [`units`]). Angles are in radians. Per-frequency triples
//! are ordered `[ω, ω1, ω2]`, with ω the sum frequency.
//!
//! ## Modules
//!
//! - [`units`]: Frequency/wavelength/wavenumber conversions.
//! - [`optics`]: Refraction angles, Fresnel factors, interfacial index.
//! - [`setup`]: Validated experimental geometry.
//! - [`orientation`]: Fixed tilt angles and tilt distributions.
//! - [`susceptibility`]: C3v molecular susceptibilities and χ_eff contractions.
//! - [`intensity`]: Reflected SFG intensity.
//! - [`lineshape`]: Lorentzian, Gaussian, Voigt and the Faddeeva function.
//! - [`spectrum`]: Resonances, backgrounds and model spectra.
//! - [`fit`]: Levenberg-Marquardt fitting of model spectra.
//! - [`error`]: The crate error type.

pub mod error;
pub mod fit;
pub mod intensity;
pub mod lineshape;
pub mod optics;
pub mod orientation;
pub mod quadrature;
pub mod setup;
pub mod spectrum;
pub mod susceptibility;
pub mod units;

pub use error::{SfgError, SfgResult};
pub use orientation::Orientation;
pub use setup::Setup;
pub use spectrum::{Background, Resonances, SpectrumModel, VoigtResonances};
pub use susceptibility::{Moiety, Polarization, TensorElement};
