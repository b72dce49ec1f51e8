//! Error types for ingestion.

use thiserror::Error;

/// Errors that can occur while reading screener inputs.
///
/// A cell that fails numeric cleaning rejects its whole file as
/// [`IngestError::Malformed`]; the screener never computes statistics over a
/// partially parsed snapshot.
#[derive(Debug, Error)]
pub enum IngestError {
    /// I/O failure while reading a file or directory.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Structural CSV failure.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A cell could not be cleaned into its expected type.
    #[error("Malformed input in {file}: {reason}")]
    Malformed {
        /// Source file description.
        file: String,
        /// What failed to parse.
        reason: String,
    },

    /// A required source column is absent from the header row.
    #[error("Missing column {column:?} in {file}")]
    MissingColumn {
        /// Source file description.
        file: String,
        /// The missing source column name.
        column: String,
    },

    /// The marked position table section was not found.
    #[error("No position table found in {0}")]
    PositionTableNotFound(String),

    /// A directory contained no usable files.
    #[error("No files found in {0}")]
    NoFiles(String),

    /// Failure constructing the cleaned table.
    #[error(transparent)]
    Screen(#[from] sagres_core::ScreenError),
}

/// A specialized Result type for ingestion.
pub type Result<T> = std::result::Result<T, IngestError>;
