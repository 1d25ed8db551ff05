//! Errors raised before or around a grid run
//!
//! Per-cell conditions (missing drivers, spin-up that does not settle) are not
//! errors; they are counted in [`RunSummary`](crate::simulation::RunSummary).

use std::fmt;

/// Errors that can occur while validating inputs or loading configuration
#[derive(Debug, Clone, PartialEq)]
pub enum StashError {
    /// Input matrices disagree on the number of cells
    RowCountMismatch {
        /// Matrix whose row count differs
        matrix: &'static str,
        /// Row count of the reference (sunshine) matrix
        expected: usize,
        /// Row count found
        found: usize,
    },
    /// An input matrix has the wrong number of columns
    ColumnCountMismatch {
        /// Offending matrix
        matrix: &'static str,
        /// Required column count (minimum for the characteristics matrix)
        expected: usize,
        /// Column count found
        found: usize,
    },
    /// Coordinates of a cell differ between driver matrices
    CoordinateMismatch {
        /// Offending matrix
        matrix: &'static str,
        /// 0-based row
        row: usize,
    },
    /// Matrix storage length does not match `rows * cols`
    MalformedMatrix {
        /// Declared rows
        rows: usize,
        /// Declared columns
        cols: usize,
        /// Number of values supplied
        len: usize,
    },
    /// A model parameter is outside its valid range
    InvalidParameter {
        /// Parameter name
        name: &'static str,
        /// Why it was rejected
        reason: String,
    },
    /// Failed to read or write a file
    Io(String),
    /// Failed to parse or serialize data
    Parse(String),
}

impl fmt::Display for StashError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StashError::RowCountMismatch {
                matrix,
                expected,
                found,
            } => write!(
                f,
                "{matrix} matrix has {found} rows, expected {expected} (one per grid cell)"
            ),
            StashError::ColumnCountMismatch {
                matrix,
                expected,
                found,
            } => write!(f, "{matrix} matrix has {found} columns, expected {expected}"),
            StashError::CoordinateMismatch { matrix, row } => {
                write!(f, "{matrix} matrix coordinates disagree with sunshine matrix at row {row}")
            }
            StashError::MalformedMatrix { rows, cols, len } => {
                write!(f, "matrix declared {rows}x{cols} but holds {len} values")
            }
            StashError::InvalidParameter { name, reason } => {
                write!(f, "invalid parameter {name}: {reason}")
            }
            StashError::Io(msg) => write!(f, "I/O failure: {msg}"),
            StashError::Parse(msg) => write!(f, "Failed to parse: {msg}"),
        }
    }
}

impl std::error::Error for StashError {}
