//! Stimulus command
//!
//! Loads a CMF table and a painted spectrum, integrates the spectrum into
//! XYZ, and prints tristimulus, chromaticity, RGB, and a terminal swatch.

use crate::StimulusArgs;
use anyhow::{Context, Result};
use glam::DVec3;
use spectra_observer::{CmfTable, Observer, Spectrum};
use spectra_primaries::ColorTransform;
use tracing::debug;

pub fn run(args: StimulusArgs) -> Result<()> {
    let table = CmfTable::from_csv_path(&args.cmf)
        .with_context(|| format!("failed to load CMF table {}", args.cmf.display()))?;
    debug!(
        records = table.len(),
        min = table.min_wavelength(),
        max = table.max_wavelength(),
        "loaded CMF table"
    );

    let observer = match args.scale {
        Some(scale) => Observer::with_scale(table, scale),
        None => Observer::new(table),
    };

    let spectrum = Spectrum::from_csv_path(&args.spectrum)
        .with_context(|| format!("failed to load spectrum {}", args.spectrum.display()))?;
    debug!(samples = spectrum.len(), "loaded spectrum");

    let primaries = args.white.primaries();
    let transform = ColorTransform::derive(&primaries)
        .with_context(|| format!("failed to derive transform for {}", primaries.name))?;

    let stimulus = observer.stimulus(&spectrum);
    let xyz = stimulus.tristimulus;

    println!("Raw tristimulus (scale {}):", observer.scale());
    println!("  X = {:.3}  Y = {:.3}  Z = {:.3}", xyz.x, xyz.y, xyz.z);

    match stimulus.chromaticity {
        Some(chroma) => {
            println!("Chromaticity:");
            println!("  x = {:.3}  y = {:.3}  z = {:.3}", chroma.x, chroma.y, chroma.z);
        }
        None => println!("Chromaticity: undefined (dark spectrum)"),
    }

    let rgb = transform.xyz_to_rgb(xyz);
    println!("Linear RGB ({}):", primaries.name);
    println!("  R = {:.3}  G = {:.3}  B = {:.3}", rgb.x, rgb.y, rgb.z);

    // Clamping to the displayable range is a presentation decision, so it
    // happens here and not in the core crates.
    let clamped = rgb.clamp(DVec3::ZERO, DVec3::ONE);
    if clamped != rgb {
        println!("  (out of gamut, clamped for display)");
    }
    println!("Swatch: {}", swatch(clamped));

    Ok(())
}

/// A 24-bit background-color escape block for a clamped linear RGB triple.
fn swatch(rgb: DVec3) -> String {
    let r = (rgb.x * 255.0).round() as u8;
    let g = (rgb.y * 255.0).round() as u8;
    let b = (rgb.z * 255.0).round() as u8;
    format!("\x1b[48;2;{r};{g};{b}m        \x1b[0m rgb({r}, {g}, {b})")
}
