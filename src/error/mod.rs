//! Error handling for the dashboard data store and metric engine.

pub mod util;

use std::io;
use std::path::PathBuf;

use arrow::error::ArrowError;
use parquet::errors::ParquetError;

use crate::engine::RoleSelection;
use crate::filter::FilterError;

/// Fatal errors raised while loading the reference tables at startup
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// A required input file does not exist
    #[error("File not found: {} (needed for {purpose})", path.display())]
    FileNotFound {
        /// Path that was looked up
        path: PathBuf,
        /// What the file was needed for
        purpose: String,
    },

    /// The file exists but could not be opened or read
    #[error("Failed to read {}: {source}", path.display())]
    Unreadable {
        /// Path of the unreadable file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// The file extension is neither `.csv` nor `.parquet`
    #[error("Unsupported file format for {}: expected .csv or .parquet", path.display())]
    UnsupportedFormat {
        /// Offending path
        path: PathBuf,
    },

    /// One or more required columns are absent from a table
    #[error("Table '{table}' is missing required columns: {}", columns.join(", "))]
    MissingColumns {
        /// Logical table name
        table: String,
        /// Source column names that were not found
        columns: Vec<String>,
    },

    /// Values could not be decoded into the expected record types
    #[error("Malformed data in table '{table}': {message}")]
    Malformed {
        /// Logical table name
        table: String,
        /// Description of the problem
        message: String,
    },

    /// The configuration file could not be parsed
    #[error("Invalid configuration in {}: {message}", path.display())]
    InvalidConfig {
        /// Configuration file path
        path: PathBuf,
        /// Parser message
        message: String,
    },

    /// Arrow error while reading or transforming batches
    #[error("Arrow error: {0}")]
    Arrow(#[from] ArrowError),

    /// Parquet decoding error
    #[error("Parquet error: {0}")]
    Parquet(#[from] ParquetError),

    /// Company scoping filter could not be applied
    #[error("Filter error: {0}")]
    Filter(#[from] FilterError),
}

impl LoadError {
    /// Shorthand for a [`LoadError::Malformed`] on the given table
    pub fn malformed(table: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Malformed {
            table: table.into(),
            message: message.into(),
        }
    }
}

/// Errors raised by individual metric queries
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    /// The selection matched no positions with a nonzero total weight
    #[error("No weighted positions match role selection {selection}")]
    EmptySelection {
        /// The selection that produced no data
        selection: RoleSelection,
    },

    /// The weighted mean overflowed and cannot be placed on the curve
    #[error("Weighted mean prestige of role selection {selection} is not finite")]
    NonFiniteMean {
        /// The selection whose aggregate overflowed
        selection: RoleSelection,
    },

    /// The prestige reference curve has no usable points
    #[error("The prestige reference curve is empty")]
    NoReferenceCurve,
}
