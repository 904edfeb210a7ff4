//! Error types for the IIF converter.
//!
//! Errors come in two tiers. [`ConvertError`] aborts the whole run and no
//! output is produced. [`RowError`] only skips the offending row; the run
//! records it as a [`RowWarning`] and carries on.

use std::fmt;
use thiserror::Error;

/// Result type alias for converter operations
pub type Result<T> = std::result::Result<T, ConvertError>;

/// Fatal errors that stop a conversion run.
#[derive(Error, Debug)]
pub enum ConvertError {
    /// Failed to open, read or write a file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing error
    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    /// Required columns could not be resolved from the input headers
    #[error(
        "Missing required columns after normalization: {}. Found columns: {}",
        missing.join(", "),
        found.join(", ")
    )]
    MissingColumns {
        missing: Vec<String>,
        found: Vec<String>,
    },

    /// Configuration file could not be parsed
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Input delimiter must be a single byte
    #[error("Invalid delimiter {0:?}: expected a single ASCII character")]
    InvalidDelimiter(String),
}

/// Recoverable problems with a single input row.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RowError {
    #[error("unparseable transaction date {0:?}")]
    InvalidDate(String),

    #[error("unparseable transacted amount {0:?}")]
    InvalidAmount(String),

    /// The CSV reader rejected the record, e.g. invalid UTF-8.
    #[error("unreadable record: {0}")]
    Unreadable(String),
}

/// A skipped row together with its position in the source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowWarning {
    /// 1-based line number, the header being line 1.
    pub row: usize,
    pub error: RowError,
}

impl fmt::Display for RowWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Row {}: {}", self.row, self.error)
    }
}
