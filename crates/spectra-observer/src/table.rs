//! Color-matching-function tables.
//!
//! A [`CmfTable`] holds the tabulated tristimulus weights of a standard
//! observer, one record per nanometer. The table is validated once at
//! construction and immutable afterwards, which lets the interpolation in
//! [`crate::Observer`] use direct integer-offset indexing instead of a
//! bracketing search.
//!
//! # File format
//!
//! Tables load from headerless CSV, one record per row:
//!
//! ```text
//! 390,0.002362,0.000253,0.010482
//! 391,0.002897,0.000304,0.012870
//! ...
//! ```
//!
//! This matches the CVRL (cvrl.org) CMF downloads, e.g.
//! `lin2012xyz10e_1_7sf.csv` for the CIE 2006 10° observer at 1 nm steps.
//!
//! # Example
//!
//! ```rust
//! use spectra_observer::{CmfRecord, CmfTable};
//!
//! let table = CmfTable::from_records(vec![
//!     CmfRecord { wavelength: 500, x: 0.0049, y: 0.3230, z: 0.2720 },
//!     CmfRecord { wavelength: 501, x: 0.0047, y: 0.3309, z: 0.2589 },
//! ]).unwrap();
//! assert_eq!(table.min_wavelength(), 500);
//! assert_eq!(table.max_wavelength(), 501);
//! ```

use crate::{ObserverError, ObserverResult};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// One tabulated CMF sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CmfRecord {
    /// Wavelength in nanometers
    pub wavelength: u32,
    /// x-bar weight
    pub x: f64,
    /// y-bar weight
    pub y: f64,
    /// z-bar weight
    pub z: f64,
}

/// A validated, immutable CMF table.
///
/// Invariants, enforced by every constructor:
///
/// - at least one record;
/// - wavelengths strictly ascending;
/// - consecutive wavelengths differ by exactly 1 nm.
#[derive(Debug, Clone, PartialEq)]
pub struct CmfTable {
    records: Vec<CmfRecord>,
}

impl CmfTable {
    /// Builds a table from records, validating the wavelength axis.
    ///
    /// # Errors
    ///
    /// Returns [`ObserverError::EmptyTable`], [`ObserverError::UnsortedTable`]
    /// or [`ObserverError::GappedTable`] when the invariants do not hold.
    pub fn from_records(records: Vec<CmfRecord>) -> ObserverResult<Self> {
        if records.is_empty() {
            return Err(ObserverError::EmptyTable);
        }
        for (index, pair) in records.windows(2).enumerate() {
            let previous = pair[0].wavelength;
            let wavelength = pair[1].wavelength;
            if wavelength <= previous {
                return Err(ObserverError::UnsortedTable {
                    index: index + 1,
                    wavelength,
                    previous,
                });
            }
            if wavelength - previous != 1 {
                return Err(ObserverError::GappedTable {
                    index: index + 1,
                    wavelength,
                    previous,
                });
            }
        }
        Ok(Self { records })
    }

    /// Reads a table from a headerless `wavelength,x,y,z` CSV file.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be read, a parse error for
    /// malformed rows, or a validation error for a bad wavelength axis.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use spectra_observer::CmfTable;
    /// use std::path::Path;
    ///
    /// let table = CmfTable::from_csv_path(Path::new("lin2012xyz10e_1_7sf.csv")).unwrap();
    /// ```
    pub fn from_csv_path(path: &Path) -> ObserverResult<Self> {
        let file = File::open(path)?;
        Self::from_csv_reader(BufReader::new(file))
    }

    /// Parses a table from any `BufRead` source of CSV rows.
    ///
    /// Empty lines and lines starting with `#` are skipped.
    pub fn from_csv_reader<R: BufRead>(reader: R) -> ObserverResult<Self> {
        let mut records = Vec::new();
        for (number, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let fields: Vec<&str> = line.split(',').map(str::trim).collect();
            if fields.len() != 4 {
                return Err(ObserverError::Parse {
                    line: number + 1,
                    message: format!("expected 4 fields, found {}", fields.len()),
                });
            }
            let parse = |field: &str| -> ObserverResult<f64> {
                field.parse().map_err(|_| ObserverError::Parse {
                    line: number + 1,
                    message: format!("invalid number {field:?}"),
                })
            };
            let wavelength = fields[0].parse().map_err(|_| ObserverError::Parse {
                line: number + 1,
                message: format!("invalid wavelength {:?}", fields[0]),
            })?;
            records.push(CmfRecord {
                wavelength,
                x: parse(fields[1])?,
                y: parse(fields[2])?,
                z: parse(fields[3])?,
            });
        }
        Self::from_records(records)
    }

    /// Number of records.
    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Always false for a constructed table; kept for API symmetry.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// First tabulated wavelength in nm.
    #[inline]
    pub fn min_wavelength(&self) -> u32 {
        self.records[0].wavelength
    }

    /// Last tabulated wavelength in nm.
    #[inline]
    pub fn max_wavelength(&self) -> u32 {
        self.records[self.records.len() - 1].wavelength
    }

    /// The records, in wavelength order.
    #[inline]
    pub fn records(&self) -> &[CmfRecord] {
        &self.records
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn record(wavelength: u32, v: f64) -> CmfRecord {
        CmfRecord {
            wavelength,
            x: v,
            y: v * 2.0,
            z: v * 3.0,
        }
    }

    #[test]
    fn test_table_valid() {
        let table =
            CmfTable::from_records(vec![record(400, 0.1), record(401, 0.2), record(402, 0.3)])
                .unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.min_wavelength(), 400);
        assert_eq!(table.max_wavelength(), 402);
    }

    #[test]
    fn test_table_empty() {
        let err = CmfTable::from_records(vec![]).unwrap_err();
        assert!(matches!(err, ObserverError::EmptyTable));
    }

    #[test]
    fn test_table_unsorted() {
        let err =
            CmfTable::from_records(vec![record(401, 0.1), record(400, 0.2)]).unwrap_err();
        assert!(matches!(err, ObserverError::UnsortedTable { index: 1, .. }));
    }

    #[test]
    fn test_table_gapped() {
        let err = CmfTable::from_records(vec![
            record(400, 0.1),
            record(401, 0.2),
            record(405, 0.3),
        ])
        .unwrap_err();
        assert!(matches!(
            err,
            ObserverError::GappedTable {
                index: 2,
                wavelength: 405,
                previous: 401,
            }
        ));
    }

    #[test]
    fn test_table_from_csv() {
        let csv = "# CVRL export\n500,0.0049,0.3230,0.2720\n501, 0.0047, 0.3309, 0.2589\n\n";
        let table = CmfTable::from_csv_reader(Cursor::new(csv)).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.records()[1].y, 0.3309);
    }

    #[test]
    fn test_table_csv_bad_field_count() {
        let err = CmfTable::from_csv_reader(Cursor::new("500,0.1,0.2")).unwrap_err();
        assert!(matches!(err, ObserverError::Parse { line: 1, .. }));
    }

    #[test]
    fn test_table_csv_bad_number() {
        let err = CmfTable::from_csv_reader(Cursor::new("500,0.1,oops,0.3")).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("oops"), "unexpected message: {message}");
    }
}
