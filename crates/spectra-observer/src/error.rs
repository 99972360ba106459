//! Observer error types.

use thiserror::Error;

/// Result type for observer operations.
pub type ObserverResult<T> = Result<T, ObserverError>;

/// Errors that can occur while building or loading a CMF table.
///
/// All of these are caller-input errors: none is transient and none is
/// retried. A failed construction leaves no partial observer behind.
#[derive(Debug, Error)]
pub enum ObserverError {
    /// The CMF table contains no records.
    #[error("CMF table is empty")]
    EmptyTable,

    /// Wavelengths are not strictly ascending.
    #[error("CMF table not sorted: record {index} has wavelength {wavelength} after {previous}")]
    UnsortedTable {
        /// Index of the offending record
        index: usize,
        /// Wavelength at that index
        wavelength: u32,
        /// Wavelength of the preceding record
        previous: u32,
    },

    /// Consecutive wavelengths differ by more than 1 nm.
    ///
    /// The interpolation uses integer-offset indexing, which is only valid
    /// for tables sampled at exactly 1 nm.
    #[error("CMF table has a gap: record {index} jumps from {previous} to {wavelength} nm")]
    GappedTable {
        /// Index of the offending record
        index: usize,
        /// Wavelength at that index
        wavelength: u32,
        /// Wavelength of the preceding record
        previous: u32,
    },

    /// A CSV row could not be parsed.
    #[error("parse error on line {line}: {message}")]
    Parse {
        /// 1-based line number
        line: usize,
        /// What went wrong
        message: String,
    },

    /// I/O error while reading a table or spectrum file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
