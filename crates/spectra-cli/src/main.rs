//! spectra - paint a spectrum, see the color
//!
//! Composes spectra-observer and spectra-primaries: integrates a spectral
//! power distribution against a standard-observer CMF table and maps the
//! resulting XYZ stimulus to display RGB.

use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use spectra_primaries::{Primaries, SRGB, SRGB_10DEG};
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(name = "spectra")]
#[command(author, version, about = "Spectral power distribution to display color")]
#[command(long_about = "
Integrates a spectral power distribution against standard-observer color
matching functions and maps the XYZ stimulus to display RGB.

Examples:
  spectra stimulus -c lin2012xyz10e_1_7sf.csv -s painted.csv
  spectra stimulus -c cmf.csv -s laser.csv --scale 1 --white d65
  spectra matrix                        # sRGB matrices, 10-degree white
  spectra matrix --white d65
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Integrate a spectrum file into XYZ, chromaticity and RGB
    #[command(visible_alias = "s")]
    Stimulus(StimulusArgs),

    /// Print the derived RGB-XYZ matrices
    #[command(visible_alias = "m")]
    Matrix(MatrixArgs),
}

/// Reference white selection for the sRGB primaries.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum White {
    /// D65 for the 2-degree observer
    D65,
    /// D65 for the 10-degree observer (matches the CIE 2006 10-degree CMFs)
    #[value(name = "d65-10deg")]
    D65TenDeg,
}

impl White {
    fn primaries(self) -> Primaries {
        match self {
            Self::D65 => SRGB,
            Self::D65TenDeg => SRGB_10DEG,
        }
    }
}

#[derive(Args)]
struct StimulusArgs {
    /// CMF table CSV (wavelength,x,y,z rows at 1nm steps)
    #[arg(short, long)]
    cmf: PathBuf,

    /// Spectrum CSV (wavelength,intensity rows, sparse)
    #[arg(short, long)]
    spectrum: PathBuf,

    /// Stimulus scale divisor (default: the built-in calibration)
    #[arg(long)]
    scale: Option<f64>,

    /// Reference white for the sRGB primaries
    #[arg(short, long, value_enum, default_value = "d65-10deg")]
    white: White,
}

#[derive(Args)]
struct MatrixArgs {
    /// Reference white for the sRGB primaries
    #[arg(short, long, value_enum, default_value = "d65-10deg")]
    white: White,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| {
            tracing_subscriber::EnvFilter::new(if cli.verbose { "debug" } else { "warn" })
        });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Stimulus(args) => commands::stimulus::run(args),
        Commands::Matrix(args) => commands::matrix::run(args),
    }
}
