//! Matrix command
//!
//! Derives and prints the RGB-XYZ matrix pair for a primary set.

use crate::MatrixArgs;
use anyhow::{Context, Result};
use glam::DMat3;
use spectra_primaries::ColorTransform;

pub fn run(args: MatrixArgs) -> Result<()> {
    let primaries = args.white.primaries();
    let transform = ColorTransform::derive(&primaries)
        .with_context(|| format!("failed to derive transform for {}", primaries.name))?;

    println!("Primaries: {}", primaries.name);
    println!("  r = ({:.5}, {:.5})", primaries.r.0, primaries.r.1);
    println!("  g = ({:.5}, {:.5})", primaries.g.0, primaries.g.1);
    println!("  b = ({:.5}, {:.5})", primaries.b.0, primaries.b.1);
    println!("  w = ({:.5}, {:.5})", primaries.w.0, primaries.w.1);

    println!("RGB -> XYZ:");
    print_matrix(transform.forward());
    println!("XYZ -> RGB:");
    print_matrix(transform.backward());

    Ok(())
}

fn print_matrix(m: DMat3) {
    for row in 0..3 {
        println!(
            "  [ {:+.7}  {:+.7}  {:+.7} ]",
            m.col(0)[row],
            m.col(1)[row],
            m.col(2)[row]
        );
    }
}
