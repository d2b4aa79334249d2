//! Error types for the conversion pipeline.

use thiserror::Error;

/// Result type alias for conversion operations
pub type Result<T> = std::result::Result<T, ConvertError>;

/// Fatal errors that abort a conversion run.
///
/// Per-row anomalies (bad timestamps, unknown transaction types, malformed
/// numeric fields) are never fatal; they are handled by skip-and-warn inside
/// the pipeline and surface in the [`ConvertReport`](crate::ConvertReport).
#[derive(Error, Debug)]
pub enum ConvertError {
    /// Failed to read the input or write the output sink
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV-level read or write failure
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The input had no header row at all (empty stream)
    #[error("input is missing the header row")]
    MissingHeader,

    /// Missing input file argument
    #[error("Missing input file argument. Usage: phoenix-koinly [-v] [-r] <phoenix-export.csv>")]
    MissingArgument,
}
