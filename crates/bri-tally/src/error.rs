//! Error types for tallying

use thiserror::Error;

/// Errors raised while loading tag sources or validating input rows
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TallyError {
    /// An input row lacks a required field; the row is rejected
    #[error("Row {row}: missing required field '{field}'")]
    MissingField {
        /// Zero-based index of the data row
        row: usize,
        /// Name of the missing column
        field: &'static str,
    },

    /// A tag source row is malformed
    #[error("Tag source error: {0}")]
    Source(String),
}
