//! Error types for pairfeat-core

use pairfeat_io::DataError;
use thiserror::Error;

/// Result type alias for feature derivation operations
pub type Result<T> = std::result::Result<T, FeatureError>;

/// Main error type for selection, derivation and sampling
#[derive(Error, Debug)]
pub enum FeatureError {
    /// A required base, rate or paired attribute is absent from the table
    #[error("Missing attribute: {0}")]
    MissingAttribute(String),

    /// A column would be created or renamed onto an existing name
    #[error("Name collision: {0}")]
    NameCollision(String),

    /// A selector configured to reject empty results matched nothing
    #[error("Pattern matched no columns: {pattern}")]
    EmptySelection { pattern: String },

    /// Requested sample is negative or larger than the population
    #[error("Invalid sample size: requested {requested}, available {available}")]
    InvalidSampleSize { requested: i64, available: usize },

    /// Arithmetic or comparison was requested on a non-numeric column
    #[error("Column is not numeric: {column}")]
    NonNumeric { column: String },

    /// Features and labels are not row-aligned
    #[error("Length mismatch: features have {expected} rows, labels have {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// The column pattern is not a valid regular expression
    #[error("Invalid pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// Derivation configuration is malformed
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Table construction or I/O failure
    #[error("Data error: {0}")]
    Data(DataError),
}

impl From<DataError> for FeatureError {
    fn from(err: DataError) -> Self {
        match err {
            DataError::ColumnNotFound(name) => FeatureError::MissingAttribute(name),
            DataError::DuplicateColumn(name) => FeatureError::NameCollision(name),
            other => FeatureError::Data(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_errors_map_onto_taxonomy() {
        let missing: FeatureError = DataError::ColumnNotFound("a_posts".to_string()).into();
        assert!(matches!(missing, FeatureError::MissingAttribute(name) if name == "a_posts"));

        let clash: FeatureError = DataError::DuplicateColumn("fe0__a_posts".to_string()).into();
        assert!(matches!(clash, FeatureError::NameCollision(name) if name == "fe0__a_posts"));

        let io: FeatureError = DataError::Io("disk full".to_string()).into();
        assert!(matches!(io, FeatureError::Data(DataError::Io(_))));
    }

    #[test]
    fn test_error_messages() {
        let err = FeatureError::InvalidSampleSize {
            requested: 10,
            available: 3,
        };
        assert_eq!(
            err.to_string(),
            "Invalid sample size: requested 10, available 3"
        );
    }
}
