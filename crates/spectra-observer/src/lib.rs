//! # spectra-observer
//!
//! Standard-observer colorimetry: CMF tables, sparse spectra, and the
//! integration of a spectrum into CIE XYZ tristimulus values.
//!
//! This crate is the perceptual half of the spectra pipeline. It knows
//! nothing about display primaries; pair it with `spectra-primaries` to turn
//! a stimulus into an RGB color.
//!
//! # Types
//!
//! - [`CmfTable`] - validated, 1 nm spaced color-matching-function table
//! - [`Spectrum`] - sparse wavelength → intensity mapping, caller-owned
//! - [`Observer`] - continuous CMF lookup and stimulus integration
//! - [`Stimulus`] - raw XYZ plus normalized chromaticity
//!
//! # Usage
//!
//! ```rust
//! use spectra_observer::{CmfRecord, CmfTable, Observer, Spectrum};
//!
//! let table = CmfTable::from_records(vec![
//!     CmfRecord { wavelength: 599, x: 1.0124, y: 0.6693, z: 0.0010 },
//!     CmfRecord { wavelength: 600, x: 1.0142, y: 0.6588, z: 0.0008 },
//!     CmfRecord { wavelength: 601, x: 1.0143, y: 0.6473, z: 0.0007 },
//! ]).unwrap();
//! let observer = Observer::new(table);
//!
//! let mut spectrum = Spectrum::new();
//! spectrum.set(600, 1.0);
//! let stimulus = observer.stimulus(&spectrum);
//! let chroma = stimulus.chromaticity.unwrap();
//! assert!((chroma.x + chroma.y + chroma.z - 1.0).abs() < 1e-12);
//! ```
//!
//! # Dependencies
//!
//! - [`glam`] - XYZ triplets as `DVec3`
//! - [`thiserror`] - Error handling
//!
//! # Used By
//!
//! - `spectra-cli` - Terminal front end

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
mod observer;
mod spectrum;
mod table;

pub use error::{ObserverError, ObserverResult};
pub use observer::{Channel, Observer, Stimulus, STIMULUS_SCALE};
pub use spectrum::Spectrum;
pub use table::{CmfRecord, CmfTable};
