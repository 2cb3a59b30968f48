//! Error types for table construction and I/O

use thiserror::Error;

/// Errors that can occur while building, reading or writing tables
#[derive(Debug, Error)]
pub enum DataError {
    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Failed to open file: {0}")]
    OpenFailed(String),

    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    #[error("Duplicate column: {0}")]
    DuplicateColumn(String),

    #[error("Length mismatch in column {column}: expected {expected} rows, got {actual}")]
    LengthMismatch {
        column: String,
        expected: usize,
        actual: usize,
    },

    #[error("Row index {index} out of bounds for {size} rows")]
    OutOfBounds { index: usize, size: usize },

    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for DataError {
    fn from(err: std::io::Error) -> Self {
        DataError::Io(err.to_string())
    }
}

/// Result type for table and I/O operations
pub type DataResult<T> = Result<T, DataError>;
