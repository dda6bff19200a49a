//! Error types for the csvutil crate.

use thiserror::Error;

/// Errors that can occur while running a csvutil operation.
#[derive(Error, Debug)]
pub enum CsvUtilError {
    /// A field spec did not match the expected grammar.
    #[error("unable to interpret spec: {0}")]
    MalformedSpec(String),

    /// An aggregation function name is not recognized.
    #[error("no such field:function operation: {0}")]
    UnknownFunction(String),

    /// A numeric operation received a value that does not parse as a number.
    #[error("non-numeric value {value:?} in field {field}")]
    NonNumericValue { field: usize, value: String },

    /// A configured field index exceeds a row's field count.
    #[error("field index {index} out of range for row with {width} fields")]
    FieldIndexOutOfRange { index: usize, width: usize },

    /// The input file is missing or unreadable.
    #[error("cannot open input {path}: {source}")]
    SourceUnavailable {
        path: String,
        source: std::io::Error,
    },

    /// IO error while reading rows or writing output.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for csvutil operations.
pub type CsvUtilResult<T> = Result<T, CsvUtilError>;
