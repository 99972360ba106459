//! Sparse spectral power distributions.
//!
//! A [`Spectrum`] maps integer wavelengths (nm) to linear intensities.
//! Wavelengths without an entry read as zero, so a freshly painted spectrum
//! only stores the wavelengths the user has touched. The spectrum is owned
//! and mutated by the presentation layer; the observer only ever reads it.
//!
//! # Example
//!
//! ```rust
//! use spectra_observer::Spectrum;
//!
//! let mut spectrum = Spectrum::new();
//! spectrum.set(550, 1.0);
//! assert_eq!(spectrum.intensity(550), 1.0);
//! assert_eq!(spectrum.intensity(551), 0.0);
//! ```

use crate::{ObserverError, ObserverResult};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// A sparse wavelength → intensity mapping.
///
/// Intensities are in arbitrary linear units; absent wavelengths are zero.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Spectrum {
    samples: BTreeMap<u32, f64>,
}

impl Spectrum {
    /// Creates an empty (all-dark) spectrum.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a spectrum from a headerless `wavelength,intensity` CSV file.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be read or a parse error for
    /// malformed rows.
    pub fn from_csv_path(path: &Path) -> ObserverResult<Self> {
        let file = File::open(path)?;
        Self::from_csv_reader(BufReader::new(file))
    }

    /// Parses a spectrum from any `BufRead` source of CSV rows.
    ///
    /// Empty lines and lines starting with `#` are skipped. A wavelength
    /// listed twice keeps the last intensity.
    pub fn from_csv_reader<R: BufRead>(reader: R) -> ObserverResult<Self> {
        let mut spectrum = Self::new();
        for (number, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let fields: Vec<&str> = line.split(',').map(str::trim).collect();
            if fields.len() != 2 {
                return Err(ObserverError::Parse {
                    line: number + 1,
                    message: format!("expected 2 fields, found {}", fields.len()),
                });
            }
            let wavelength: u32 = fields[0].parse().map_err(|_| ObserverError::Parse {
                line: number + 1,
                message: format!("invalid wavelength {:?}", fields[0]),
            })?;
            let intensity: f64 = fields[1].parse().map_err(|_| ObserverError::Parse {
                line: number + 1,
                message: format!("invalid intensity {:?}", fields[1]),
            })?;
            spectrum.set(wavelength, intensity);
        }
        Ok(spectrum)
    }

    /// Sets the intensity at a wavelength, replacing any previous value.
    pub fn set(&mut self, wavelength: u32, intensity: f64) {
        self.samples.insert(wavelength, intensity);
    }

    /// Intensity at a wavelength, zero when absent.
    #[inline]
    pub fn intensity(&self, wavelength: u32) -> f64 {
        self.samples.get(&wavelength).copied().unwrap_or(0.0)
    }

    /// Fills an inclusive wavelength span with linearly interpolated
    /// intensities, from `i0` at `from` to `i1` at `to`.
    ///
    /// The span may run in either direction, which is how a drag gesture
    /// arrives from the UI: the previous pointer sample is one endpoint,
    /// the current sample the other.
    ///
    /// # Example
    ///
    /// ```rust
    /// use spectra_observer::Spectrum;
    ///
    /// let mut spectrum = Spectrum::new();
    /// spectrum.set_segment(500, 504, 0.0, 1.0);
    /// assert_eq!(spectrum.intensity(502), 0.5);
    /// assert_eq!(spectrum.intensity(504), 1.0);
    /// ```
    pub fn set_segment(&mut self, from: u32, to: u32, i0: f64, i1: f64) {
        if from == to {
            self.set(to, i1);
            return;
        }
        let span = from.abs_diff(to);
        let step: i64 = if to > from { 1 } else { -1 };
        for k in 0..=span {
            let wavelength = (i64::from(from) + step * i64::from(k)) as u32;
            let t = f64::from(k) / f64::from(span);
            self.set(wavelength, i0 + (i1 - i0) * t);
        }
    }

    /// Multiplies every stored intensity by `k`.
    pub fn scale(&mut self, k: f64) {
        for intensity in self.samples.values_mut() {
            *intensity *= k;
        }
    }

    /// Removes all samples.
    pub fn clear(&mut self) {
        self.samples.clear();
    }

    /// True if no wavelength has been set.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Number of stored samples.
    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Iterates stored `(wavelength, intensity)` pairs in wavelength order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, f64)> + '_ {
        self.samples.iter().map(|(&wavelength, &intensity)| (wavelength, intensity))
    }
}

impl FromIterator<(u32, f64)> for Spectrum {
    fn from_iter<I: IntoIterator<Item = (u32, f64)>>(iter: I) -> Self {
        Self {
            samples: iter.into_iter().collect(),
        }
    }
}
