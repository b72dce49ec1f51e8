//! Error types for the Sagres screener.
//!
//! This module defines the error types used throughout the Sagres ecosystem,
//! covering schema validation, statistics computation, and table transforms.

use thiserror::Error;

/// The main error type for Sagres operations.
///
/// Malformed input is always surfaced through one of these variants for the
/// whole table; the screener never silently drops rows, since grouped
/// statistics would otherwise be computed over an incomplete population.
#[derive(Debug, Error)]
pub enum ScreenError {
    /// A required column is missing from the input table.
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// A column is present but carries the wrong data type.
    #[error("Column {column} has the wrong type, expected {expected}")]
    ColumnType {
        /// The offending column name.
        column: String,
        /// The expected Polars data type.
        expected: &'static str,
    },

    /// Input data violates a structural invariant.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// A market cap group label could not be interpreted.
    #[error("Unknown market cap group: {0}")]
    UnknownMarketCapGroup(String),

    /// Error from Polars operations.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// Generic error for other cases.
    #[error("Error: {0}")]
    Other(String),
}

impl From<String> for ScreenError {
    fn from(s: String) -> Self {
        Self::Other(s)
    }
}

impl From<&str> for ScreenError {
    fn from(s: &str) -> Self {
        Self::Other(s.to_string())
    }
}

/// A specialized Result type for Sagres operations.
pub type Result<T> = std::result::Result<T, ScreenError>;
