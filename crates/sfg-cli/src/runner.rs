//! Job runner: ties together setup, materials, susceptibilities and spectra.

use std::io::Write;
use std::path::Path;

use anyhow::{bail, Context, Result};
use num_complex::Complex64;
use serde::Serialize;

use sfg_core::fit::{fit_spectrum, FitResult};
use sfg_core::intensity::sfg_intensity_for_setup;
use sfg_core::spectrum::linspace;
use sfg_core::susceptibility::effective_susceptibility;
use sfg_core::units::{freq2wl, wavenumber2freq, wl2freq};
use sfg_core::{Moiety, Polarization, Setup, SpectrumModel};
use sfg_materials::lookup;

use crate::config::{BeamFrequency, JobConfig, MediumConfig, SetupConfig};

/// Effective susceptibility and intensity of one polarization combination.
#[derive(Debug, Clone, Serialize)]
pub struct SusceptibilityRow {
    pub polarization: Polarization,
    pub chi_eff: Complex64,
    pub intensity: f64,
}

/// Model spectrum on the job grid.
#[derive(Debug, Clone, Serialize)]
pub struct SpectrumOutput {
    pub wavenumbers: Vec<f64>,
    pub intensity: Vec<f64>,
    pub chi: Vec<Complex64>,
}

fn beam_frequency(beam: BeamFrequency) -> f64 {
    match beam {
        BeamFrequency::Wavelength { wavelength_nm } => wl2freq(wavelength_nm),
        BeamFrequency::Wavenumber { wavenumber_cm } => wavenumber2freq(wavenumber_cm),
    }
}

/// Refractive indices of a medium at the vacuum wavelengths `[λ, λ1, λ2]`.
pub fn resolve_medium(medium: &MediumConfig, wavelengths_nm: [f64; 3]) -> Result<[Complex64; 3]> {
    match medium {
        MediumConfig::Constant { n, k } => Ok([Complex64::new(*n, *k); 3]),
        MediumConfig::PerBeam { n, k } => Ok([0usize, 1, 2].map(|i| Complex64::new(n[i], k[i]))),
        MediumConfig::Id(id) => {
            let material = lookup(id).with_context(|| format!("unknown medium '{id}'"))?;
            let mut out = [Complex64::new(0.0, 0.0); 3];
            for (slot, &wl) in out.iter_mut().zip(&wavelengths_nm) {
                *slot = material.refractive_index(wl).with_context(|| {
                    format!(
                        "medium '{}' has no data at {:.1} nm; give explicit indices instead",
                        material.name(),
                        wl
                    )
                })?;
            }
            Ok(out)
        }
    }
}

/// Build the [`Setup`] described by a job file.
pub fn build_setup(config: &SetupConfig) -> Result<Setup> {
    let omega1 = beam_frequency(config.visible);
    let omega2 = beam_frequency(config.infrared);
    let wavelengths = [freq2wl(omega1 + omega2), freq2wl(omega1), freq2wl(omega2)];

    let n1 = resolve_medium(&config.medium1, wavelengths).context("medium1")?;
    let n2 = resolve_medium(&config.medium2, wavelengths).context("medium2")?;
    let [b1, b2] = config.angles_deg.map(f64::to_radians);

    log::debug!("setup wavelengths (nm): {wavelengths:?}, n1 = {n1:?}, n2 = {n2:?}");

    let setup = Setup::new(
        (omega1, omega2),
        (b1, b2),
        (n1[0], n1[1], n1[2]),
        (n2[0], n2[1], n2[2]),
    )?;
    Ok(setup)
}

fn job_moiety(job: &JobConfig) -> Result<Moiety> {
    let spec = job
        .moiety
        .clone()
        .context("the job has no [moiety] section")?;
    Ok(Moiety::try_from(spec)?)
}

fn job_spectrum(job: &JobConfig) -> Result<&SpectrumModel> {
    job.spectrum
        .as_ref()
        .context("the job has no [spectrum] section")
}

/// Effective susceptibility and intensity for every requested polarization.
pub fn run_susceptibility(job: &JobConfig) -> Result<Vec<SusceptibilityRow>> {
    let setup = build_setup(&job.setup)?;
    let moiety = job_moiety(job)?;
    let orientation = job.orientation.to_orientation();

    println!(
        "  SF beam: {:.1} nm at {:.2}°",
        freq2wl(setup.omega()),
        setup.beta().to_degrees()
    );

    let mut rows = Vec::with_capacity(job.polarizations.len());
    for &polarization in &job.polarizations {
        let chi_eff = effective_susceptibility(&orientation, &setup, polarization, &moiety)
            .with_context(|| format!("{polarization} effective susceptibility"))?;
        let intensity = sfg_intensity_for_setup(&setup, chi_eff, &job.intensity);
        println!(
            "  {}: χ_eff = {:.6e} {:+.6e}i, I = {:.6e}",
            polarization, chi_eff.re, chi_eff.im, intensity
        );
        rows.push(SusceptibilityRow {
            polarization,
            chi_eff,
            intensity,
        });
    }
    Ok(rows)
}

/// Evaluate the job's model spectrum on its grid.
pub fn run_spectrum(job: &JobConfig) -> Result<SpectrumOutput> {
    let model = job_spectrum(job)?;
    if job.grid.points < 2 {
        bail!("grid needs at least 2 points, got {}", job.grid.points);
    }
    let wavenumbers = linspace(job.grid.start, job.grid.end, job.grid.points);
    let chi: Vec<Complex64> = wavenumbers.iter().map(|&x| model.susceptibility(x)).collect();
    let intensity = chi.iter().map(|c| c.norm_sqr()).collect();
    println!(
        "  {} resonances on {} points, {:.1}–{:.1} cm⁻¹",
        model.resonances().len(),
        wavenumbers.len(),
        job.grid.start,
        job.grid.end
    );
    Ok(SpectrumOutput {
        wavenumbers,
        intensity,
        chi,
    })
}

/// Fit the job's model spectrum to measured data.
pub fn run_fit(job: &JobConfig, xs: &[f64], ys: &[f64]) -> Result<FitResult> {
    let model = job_spectrum(job)?;
    let result = fit_spectrum(xs, ys, model, &job.fit)?;
    println!(
        "  {} iterations, residual sum of squares {:.6e}{}",
        result.iterations,
        result.residual_sum_squares,
        match (result.converged, result.stalled) {
            (true, _) => "",
            (false, true) => " (stalled)",
            (false, false) => " (not converged)",
        }
    );
    let r = result.model.resonances();
    for q in 0..r.len() {
        println!(
            "  resonance {}: A = {:.6e}, ω = {:.3} cm⁻¹, Γ = {:.3} cm⁻¹",
            q + 1,
            r.amplitudes()[q],
            r.positions()[q],
            r.widths()[q]
        );
    }
    Ok(result)
}

/// Parse a two-column `x, y` data file.
///
/// Lines starting with `#` are comments; a non-numeric first line is taken
/// as a header.
pub fn parse_data(text: &str) -> Result<(Vec<f64>, Vec<f64>)> {
    let mut xs = Vec::new();
    let mut ys = Vec::new();
    for (lineno, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let mut fields = line
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|s| !s.is_empty());
        let (Some(x), Some(y)) = (fields.next(), fields.next()) else {
            bail!("line {}: expected two columns", lineno + 1);
        };
        match (x.parse::<f64>(), y.parse::<f64>()) {
            (Ok(x), Ok(y)) => {
                xs.push(x);
                ys.push(y);
            }
            _ if xs.is_empty() => log::debug!("skipping header line {}", lineno + 1),
            _ => bail!("line {}: cannot parse '{}'", lineno + 1, line),
        }
    }
    Ok((xs, ys))
}

/// Read a two-column data file from disk.
pub fn read_data(path: &Path) -> Result<(Vec<f64>, Vec<f64>)> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read data file {}", path.display()))?;
    parse_data(&text).with_context(|| format!("invalid data file {}", path.display()))
}

fn create_file(path: &Path) -> Result<std::fs::File> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::File::create(path).with_context(|| format!("cannot create {}", path.display()))
}

/// Write susceptibility rows as CSV.
pub fn write_susceptibility_csv(rows: &[SusceptibilityRow], path: &Path) -> Result<()> {
    let mut file = create_file(path)?;
    writeln!(file, "# sfg-cli effective susceptibilities")?;
    writeln!(file, "# Version: {}", env!("CARGO_PKG_VERSION"))?;
    writeln!(file, "polarization,chi_eff_re,chi_eff_im,chi_eff_abs,intensity")?;
    for row in rows {
        writeln!(
            file,
            "{},{:.6e},{:.6e},{:.6e},{:.6e}",
            row.polarization,
            row.chi_eff.re,
            row.chi_eff.im,
            row.chi_eff.norm(),
            row.intensity
        )?;
    }
    println!("Susceptibilities written to: {}", path.display());
    Ok(())
}

/// Write a model spectrum as CSV.
pub fn write_spectrum_csv(spectrum: &SpectrumOutput, path: &Path) -> Result<()> {
    let mut file = create_file(path)?;
    writeln!(file, "# sfg-cli model spectrum")?;
    writeln!(file, "# Version: {}", env!("CARGO_PKG_VERSION"))?;
    writeln!(file, "wavenumber_cm,intensity,chi_re,chi_im")?;
    for ((x, i), c) in spectrum
        .wavenumbers
        .iter()
        .zip(&spectrum.intensity)
        .zip(&spectrum.chi)
    {
        writeln!(file, "{:.4},{:.6e},{:.6e},{:.6e}", x, i, c.re, c.im)?;
    }
    println!("Spectrum written to: {}", path.display());
    Ok(())
}

/// Write measured data next to the fitted model as CSV.
pub fn write_fit_csv(result: &FitResult, xs: &[f64], ys: &[f64], path: &Path) -> Result<()> {
    let mut file = create_file(path)?;
    writeln!(file, "# sfg-cli fit")?;
    writeln!(file, "# Version: {}", env!("CARGO_PKG_VERSION"))?;
    writeln!(file, "# rss: {:.6e}", result.residual_sum_squares)?;
    writeln!(file, "wavenumber_cm,data,model,residual")?;
    let model = result.model.evaluate_grid(xs);
    for ((x, y), m) in xs.iter().zip(ys).zip(model.iter()) {
        writeln!(file, "{:.4},{:.6e},{:.6e},{:.6e}", x, y, m, m - y)?;
    }
    println!("Fit written to: {}", path.display());
    Ok(())
}

/// Write any serialisable result as pretty JSON.
pub fn write_json<T: Serialize + ?Sized>(value: &T, path: &Path) -> Result<()> {
    let mut file = create_file(path)?;
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| anyhow::anyhow!("JSON serialisation error: {}", e))?;
    file.write_all(json.as_bytes())?;
    println!("JSON written to: {}", path.display());
    Ok(())
}
