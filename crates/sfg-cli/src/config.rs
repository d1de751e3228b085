//! TOML configuration deserialisation for SFG jobs.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use sfg_core::fit::FitOptions;
use sfg_core::intensity::IntensityOptions;
use sfg_core::susceptibility::MoietySpec;
use sfg_core::{Orientation, Polarization, SpectrumModel};

/// Top-level job configuration.
#[derive(Debug, Deserialize)]
pub struct JobConfig {
    pub setup: SetupConfig,
    pub moiety: Option<MoietySpec>,
    #[serde(default)]
    pub orientation: OrientationConfig,
    #[serde(default = "default_polarizations")]
    pub polarizations: Vec<Polarization>,
    #[serde(default)]
    pub intensity: IntensityOptions,
    pub spectrum: Option<SpectrumModel>,
    #[serde(default)]
    pub grid: GridConfig,
    #[serde(default)]
    pub fit: FitOptions,
    #[serde(default)]
    pub output: OutputConfig,
}

fn default_polarizations() -> Vec<Polarization> {
    vec![Polarization::Ssp, Polarization::Ppp]
}

/// Beam geometry and the two bulk media.
#[derive(Debug, Deserialize)]
pub struct SetupConfig {
    /// The ω1 (usually visible) beam.
    pub visible: BeamFrequency,
    /// The ω2 (usually infrared) beam.
    pub infrared: BeamFrequency,
    /// Incidence angles of (ω1, ω2) in degrees.
    pub angles_deg: [f64; 2],
    /// Medium the beams propagate in.
    #[serde(default = "default_medium1")]
    pub medium1: MediumConfig,
    /// Medium on the other side of the interface.
    pub medium2: MediumConfig,
}

fn default_medium1() -> MediumConfig {
    MediumConfig::Id("air".into())
}

/// Beam frequency given as a vacuum wavelength or a wavenumber.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(untagged)]
pub enum BeamFrequency {
    Wavelength { wavelength_nm: f64 },
    Wavenumber { wavenumber_cm: f64 },
}

/// Refractive index of a medium: a material id or explicit values.
///
/// Explicit triples are ordered `[ω, ω1, ω2]`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum MediumConfig {
    Id(String),
    Constant {
        n: f64,
        #[serde(default)]
        k: f64,
    },
    PerBeam {
        n: [f64; 3],
        #[serde(default)]
        k: [f64; 3],
    },
}

/// Tilt orientation in degrees.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OrientationConfig {
    Fixed { theta_deg: f64 },
    Normal { mean_deg: f64, std_dev_deg: f64 },
    Uniform { low_deg: f64, high_deg: f64 },
}

impl Default for OrientationConfig {
    fn default() -> Self {
        Self::Fixed { theta_deg: 0.0 }
    }
}

impl OrientationConfig {
    pub fn to_orientation(self) -> Orientation {
        match self {
            Self::Fixed { theta_deg } => Orientation::fixed(theta_deg.to_radians()),
            Self::Normal { mean_deg, std_dev_deg } => Orientation::Normal {
                mean: mean_deg.to_radians(),
                std_dev: std_dev_deg.to_radians(),
            },
            Self::Uniform { low_deg, high_deg } => Orientation::Uniform {
                low: low_deg.to_radians(),
                high: high_deg.to_radians(),
            },
        }
    }
}

/// Evaluation grid for spectra, in cm⁻¹.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct GridConfig {
    #[serde(default = "default_grid_start")]
    pub start: f64,
    #[serde(default = "default_grid_end")]
    pub end: f64,
    #[serde(default = "default_grid_points")]
    pub points: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            start: default_grid_start(),
            end: default_grid_end(),
            points: default_grid_points(),
        }
    }
}

fn default_grid_start() -> f64 {
    2800.0
}
fn default_grid_end() -> f64 {
    3100.0
}
fn default_grid_points() -> usize {
    301
}

/// Output configuration.
#[derive(Debug, Deserialize)]
pub struct OutputConfig {
    /// Output directory (default: "./output").
    #[serde(default = "default_output_dir")]
    pub directory: String,
    /// Whether to write CSV files (default: true).
    #[serde(default = "default_true")]
    pub save_csv: bool,
    /// Whether to also write JSON (default: false).
    #[serde(default)]
    pub save_json: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_output_dir(),
            save_csv: true,
            save_json: false,
        }
    }
}

fn default_output_dir() -> String {
    "./output".into()
}
fn default_true() -> bool {
    true
}

/// Parse a job configuration from TOML text.
pub fn parse_config(content: &str) -> Result<JobConfig> {
    let config: JobConfig = toml::from_str(content)?;
    Ok(config)
}

/// Load and parse a TOML job configuration file.
pub fn load_config(path: &Path) -> Result<JobConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read job file {}", path.display()))?;
    parse_config(&content).with_context(|| format!("invalid job file {}", path.display()))
}
