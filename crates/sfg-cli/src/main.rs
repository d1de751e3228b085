//! SFG command-line interface.
//!
//! Evaluate SFG quantities from TOML job files:
//! ```sh
//! sfg-cli susceptibility job.toml
//! sfg-cli spectrum job.toml
//! sfg-cli fit job.toml data.csv
//! sfg-cli validate job.toml
//! sfg-cli materials
//! ```

mod config;
mod runner;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use sfg_core::Moiety;
use sfg_materials::{lookup, MATERIAL_IDS};

#[derive(Parser)]
#[command(name = "sfg-cli")]
#[command(about = "Sum-frequency generation spectroscopy toolkit")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Effective susceptibilities and intensities for the job's moiety.
    Susceptibility {
        /// Path to the job configuration file.
        config: PathBuf,
        /// Output directory (overrides config file setting).
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Evaluate the job's model spectrum on its grid.
    Spectrum {
        /// Path to the job configuration file.
        config: PathBuf,
        /// Output directory (overrides config file setting).
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Fit the job's model spectrum to measured data.
    Fit {
        /// Path to the job configuration file.
        config: PathBuf,
        /// Two-column (wavenumber, intensity) data file.
        data: PathBuf,
        /// Output directory (overrides config file setting).
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Validate a configuration file without computing anything.
    Validate {
        /// Path to the job configuration file.
        config: PathBuf,
    },
    /// Display information about available materials.
    Materials,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Susceptibility { config, output } => {
            let job = config::load_config(&config)?;
            println!("Configuration: {}", config.display());
            let rows = runner::run_susceptibility(&job)?;

            let out_dir = output.unwrap_or_else(|| PathBuf::from(&job.output.directory));
            if job.output.save_csv {
                runner::write_susceptibility_csv(&rows, &out_dir.join("susceptibility.csv"))?;
            }
            if job.output.save_json {
                runner::write_json(&rows, &out_dir.join("susceptibility.json"))?;
            }
            Ok(())
        }
        Commands::Spectrum { config, output } => {
            let job = config::load_config(&config)?;
            println!("Configuration: {}", config.display());
            let spectrum = runner::run_spectrum(&job)?;

            let out_dir = output.unwrap_or_else(|| PathBuf::from(&job.output.directory));
            if job.output.save_csv {
                runner::write_spectrum_csv(&spectrum, &out_dir.join("spectrum.csv"))?;
            }
            if job.output.save_json {
                runner::write_json(&spectrum, &out_dir.join("spectrum.json"))?;
            }
            Ok(())
        }
        Commands::Fit {
            config,
            data,
            output,
        } => {
            let job = config::load_config(&config)?;
            println!("Configuration: {}", config.display());
            let (xs, ys) = runner::read_data(&data)?;
            println!("Data: {} ({} points)", data.display(), xs.len());
            let result = runner::run_fit(&job, &xs, &ys)?;

            let out_dir = output.unwrap_or_else(|| PathBuf::from(&job.output.directory));
            if job.output.save_csv {
                runner::write_fit_csv(&result, &xs, &ys, &out_dir.join("fit.csv"))?;
            }
            runner::write_json(&result, &out_dir.join("fit.json"))?;
            Ok(())
        }
        Commands::Validate { config } => {
            let job = config::load_config(&config)?;
            runner::build_setup(&job.setup).context("setup")?;
            if let Some(spec) = job.moiety.clone() {
                Moiety::try_from(spec).context("moiety")?;
            }
            job.orientation
                .to_orientation()
                .validate()
                .context("orientation")?;
            println!("Configuration is valid: {}", config.display());
            Ok(())
        }
        Commands::Materials => {
            println!("Available materials:");
            println!();
            for id in MATERIAL_IDS {
                let material = lookup(id)?;
                let (lo, hi) = material.wavelength_range();
                if hi.is_finite() {
                    println!("  {:<6} — {}, {:.0}–{:.0} nm", id, material.name(), lo, hi);
                } else {
                    println!("  {:<6} — {}, all wavelengths", id, material.name());
                }
            }
            Ok(())
        }
    }
}
