//! Error taxonomy for dataset construction and anonymization calls.
//!
//! Every fallible operation validates its inputs before touching the table, so
//! an `Err` always means the dataset was left exactly as it was passed in.

use thiserror::Error;

/// Errors surfaced by the anonymization engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnonymizeError {
    /// A requested column does not exist in the dataset.
    #[error("column `{column}` does not exist in the dataset")]
    InvalidColumn {
        /// The name that failed to resolve.
        column: String,
    },
    /// The k-anonymity threshold is below 1.
    #[error("k-anonymity threshold must be at least 1 (got {k})")]
    InvalidThreshold {
        /// The rejected threshold.
        k: usize,
    },
    /// A column name appears more than once.
    #[error("column `{column}` is defined more than once")]
    DuplicateColumn {
        /// The repeated name.
        column: String,
    },
    /// A row or column does not line up with the rest of the table.
    #[error("expected {expected} values, found {found}")]
    RowLengthMismatch {
        /// Length required by the existing table.
        expected: usize,
        /// Length that was supplied.
        found: usize,
    },
}

impl AnonymizeError {
    pub(crate) fn invalid_column(column: impl Into<String>) -> Self {
        Self::InvalidColumn {
            column: column.into(),
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, AnonymizeError>;

#[cfg(test)]
mod tests {
    use super::AnonymizeError;

    #[test]
    fn messages_name_the_offending_input() {
        let err = AnonymizeError::invalid_column("zip");
        assert_eq!(err.to_string(), "column `zip` does not exist in the dataset");

        let err = AnonymizeError::InvalidThreshold { k: 0 };
        assert_eq!(
            err.to_string(),
            "k-anonymity threshold must be at least 1 (got 0)"
        );

        let err = AnonymizeError::RowLengthMismatch {
            expected: 3,
            found: 2,
        };
        assert_eq!(err.to_string(), "expected 3 values, found 2");
    }
}
