//! Error types for the filtering system

use arrow::error::ArrowError;

/// Errors raised while evaluating filter expressions
#[derive(Debug, thiserror::Error)]
pub enum FilterError {
    /// The filter refers to a column the batch does not have
    #[error("Column '{0}' not found in record batch")]
    ColumnNotFound(String),

    /// The column's type does not match the literal it is compared against
    #[error("Column '{column}' has type {actual}, expected {expected}")]
    ColumnType {
        /// Column name
        column: String,
        /// Type implied by the literal
        expected: &'static str,
        /// Actual Arrow type
        actual: String,
    },

    /// Mask length and batch size disagree
    #[error("Mask length ({mask}) doesn't match batch row count ({rows})")]
    MaskLength {
        /// Number of mask entries
        mask: usize,
        /// Number of rows in the batch
        rows: usize,
    },

    /// Arrow compute failure
    #[error("Arrow error: {0}")]
    Arrow(#[from] ArrowError),
}
