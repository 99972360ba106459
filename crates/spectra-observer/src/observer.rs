//! The standard observer: interpolated CMFs and stimulus integration.
//!
//! An [`Observer`] wraps a validated [`CmfTable`] and exposes the three
//! color matching functions as continuous functions of wavelength, plus the
//! integral of an arbitrary [`Spectrum`] against them.
//!
//! # Usage
//!
//! ```rust
//! use spectra_observer::{Channel, CmfRecord, CmfTable, Observer, Spectrum};
//!
//! let table = CmfTable::from_records(vec![
//!     CmfRecord { wavelength: 540, x: 0.2, y: 0.9, z: 0.02 },
//!     CmfRecord { wavelength: 541, x: 0.3, y: 1.0, z: 0.01 },
//! ]).unwrap();
//! let observer = Observer::new(table);
//!
//! // Continuous lookup between tabulated samples
//! let y = observer.value_at(Channel::Y, 540.5);
//! assert!((y - 0.95).abs() < 1e-12);
//!
//! // Integrate a painted spectrum
//! let spectrum: Spectrum = [(540, 1.0)].into_iter().collect();
//! let stimulus = observer.stimulus(&spectrum);
//! assert!(stimulus.chromaticity.is_some());
//! ```

use crate::{CmfRecord, CmfTable, Spectrum};
use glam::DVec3;

/// Default scale divisor applied to raw tristimulus sums.
///
/// Empirical calibration, not colorimetry: it keeps XYZ near the unit range
/// for typical hand-painted spectra with intensities around 1. Use
/// [`Observer::with_scale`] when your intensities live on another scale.
pub const STIMULUS_SCALE: f64 = 120.0;

/// Below this raw (unscaled) X+Y+Z, chromaticity is undefined.
const DEGENERATE_TOTAL: f64 = 1e-12;

/// One of the three color matching functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    /// x-bar
    X,
    /// y-bar
    Y,
    /// z-bar
    Z,
}

impl Channel {
    #[inline]
    fn sample(self, record: CmfRecord) -> f64 {
        match self {
            Self::X => record.x,
            Self::Y => record.y,
            Self::Z => record.z,
        }
    }
}

/// The result of integrating a spectrum against an observer.
///
/// Produced fresh by every [`Observer::stimulus`] call; the observer keeps
/// no reference to it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stimulus {
    /// Raw tristimulus (X, Y, Z), divided by the observer's stimulus scale.
    pub tristimulus: DVec3,
    /// Normalized chromaticity (x, y, z) with x + y + z = 1.
    ///
    /// `None` for an all-dark spectrum, where normalization would divide
    /// by zero.
    pub chromaticity: Option<DVec3>,
}

/// A standard observer backed by a CMF table.
///
/// Immutable after construction. The wavelength bounds and per-channel
/// maxima are cached eagerly; the maxima exist for chart scaling only and
/// play no part in the colorimetry.
#[derive(Debug, Clone)]
pub struct Observer {
    table: CmfTable,
    min_wavelength: u32,
    max_wavelength: u32,
    max_x: f64,
    max_y: f64,
    max_z: f64,
    scale: f64,
}

impl Observer {
    /// Creates an observer with the default [`STIMULUS_SCALE`].
    pub fn new(table: CmfTable) -> Self {
        Self::with_scale(table, STIMULUS_SCALE)
    }

    /// Creates an observer with an explicit stimulus scale divisor.
    pub fn with_scale(table: CmfTable, scale: f64) -> Self {
        let min_wavelength = table.min_wavelength();
        let max_wavelength = table.max_wavelength();
        let mut max_x = 0.0f64;
        let mut max_y = 0.0f64;
        let mut max_z = 0.0f64;
        for record in table.records() {
            max_x = max_x.max(record.x);
            max_y = max_y.max(record.y);
            max_z = max_z.max(record.z);
        }
        Self {
            table,
            min_wavelength,
            max_wavelength,
            max_x,
            max_y,
            max_z,
            scale,
        }
    }

    /// First tabulated wavelength in nm.
    #[inline]
    pub fn min_wavelength(&self) -> u32 {
        self.min_wavelength
    }

    /// Last tabulated wavelength in nm.
    #[inline]
    pub fn max_wavelength(&self) -> u32 {
        self.max_wavelength
    }

    /// Column maximum of x-bar (for chart scaling).
    #[inline]
    pub fn max_x(&self) -> f64 {
        self.max_x
    }

    /// Column maximum of y-bar (for chart scaling).
    #[inline]
    pub fn max_y(&self) -> f64 {
        self.max_y
    }

    /// Column maximum of z-bar (for chart scaling).
    #[inline]
    pub fn max_z(&self) -> f64 {
        self.max_z
    }

    /// Largest of the three channel maxima.
    #[inline]
    pub fn max_value(&self) -> f64 {
        self.max_x.max(self.max_y).max(self.max_z)
    }

    /// The stimulus scale divisor in effect.
    #[inline]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// The backing table.
    #[inline]
    pub fn table(&self) -> &CmfTable {
        &self.table
    }

    /// Continuous CMF lookup at an arbitrary wavelength.
    ///
    /// Zero outside the tabulated range; the exact table value at every
    /// tabulated wavelength; linear interpolation in between. The direct
    /// integer-offset indexing is valid because [`CmfTable`] guarantees
    /// 1 nm spacing.
    pub fn value_at(&self, channel: Channel, wavelength: f64) -> f64 {
        let min = f64::from(self.min_wavelength);
        let max = f64::from(self.max_wavelength);
        if wavelength < min || wavelength > max {
            return 0.0;
        }
        let records = self.table.records();
        // The right edge has no bracketing record above it.
        if wavelength == max {
            return channel.sample(records[records.len() - 1]);
        }

        let offset = wavelength - min;
        let i = offset.floor() as usize;
        let t = offset - i as f64;
        let a = channel.sample(records[i]);
        let b = channel.sample(records[i + 1]);
        a + (b - a) * t
    }

    /// x-bar at a wavelength. Shorthand for [`Observer::value_at`].
    #[inline]
    pub fn x(&self, wavelength: f64) -> f64 {
        self.value_at(Channel::X, wavelength)
    }

    /// y-bar at a wavelength.
    #[inline]
    pub fn y(&self, wavelength: f64) -> f64 {
        self.value_at(Channel::Y, wavelength)
    }

    /// z-bar at a wavelength.
    #[inline]
    pub fn z(&self, wavelength: f64) -> f64 {
        self.value_at(Channel::Z, wavelength)
    }

    /// Integrates a spectrum against the three CMFs.
    ///
    /// A left Riemann sum at 1 nm steps over `[min_wavelength,
    /// max_wavelength)`. The upper bound is exclusive: intensity at the
    /// last tabulated wavelength never contributes. The raw sums are
    /// divided by the observer's scale; chromaticity is `None` when the
    /// spectrum integrates to zero energy.
    ///
    /// Pure: reads the spectrum as a snapshot and keeps nothing.
    pub fn stimulus(&self, spectrum: &Spectrum) -> Stimulus {
        let records = self.table.records();
        let mut sum = DVec3::ZERO;
        for (wavelength, intensity) in spectrum.iter() {
            if wavelength < self.min_wavelength || wavelength >= self.max_wavelength {
                continue;
            }
            let record = records[(wavelength - self.min_wavelength) as usize];
            sum += intensity * DVec3::new(record.x, record.y, record.z);
        }

        let total = sum.x + sum.y + sum.z;
        let chromaticity = if total.abs() < DEGENERATE_TOTAL {
            None
        } else {
            let x = sum.x / total;
            let y = sum.y / total;
            Some(DVec3::new(x, y, 1.0 - x - y))
        };

        Stimulus {
            tristimulus: sum / self.scale,
            chromaticity,
        }
    }
}
