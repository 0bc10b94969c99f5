//! Error types for the recommender.

use thiserror::Error;

/// Result type alias using the recommender's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading a catalog, building an engine or
/// syncing with a remote spreadsheet.
///
/// An unknown query title is not an error: `recommend` answers it with an
/// empty result.
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid tunable parameter (alpha, vocabulary cap, n-gram range...).
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Two vectors or matrices that must be index-aligned are not.
    #[error("Shape error: expected length {expected}, got {actual}")]
    Shape { expected: usize, actual: usize },

    /// The catalog contains the same title twice.
    #[error("Duplicate title {title:?} at row {row} (first seen at row {first_row})")]
    DuplicateTitle {
        title: String,
        first_row: usize,
        row: usize,
    },

    /// A required column is absent from the input table.
    #[error("Missing column: {0}")]
    MissingColumn(String),

    /// A cell could not be turned into a typed value.
    #[error("Invalid value at row {row}, column {column:?}: {message}")]
    InvalidValue {
        row: usize,
        column: String,
        message: String,
    },

    /// I/O error reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV reader/writer error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing error.
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Credential configuration for the spreadsheet service is missing.
    #[error("Credentials error: {0}")]
    Credentials(String),

    /// The spreadsheet service failed or answered with an error.
    #[error("Sheets error: {0}")]
    Sheets(String),

    /// The requested worksheet (tab) does not exist.
    #[error("Worksheet not found: {0}")]
    WorksheetNotFound(String),
}

impl Error {
    /// Create a new configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Create a new shape error.
    pub fn shape(expected: usize, actual: usize) -> Self {
        Self::Shape { expected, actual }
    }

    /// Create a new invalid value error.
    pub fn invalid_value(row: usize, column: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            row,
            column: column.into(),
            message: message.into(),
        }
    }

    /// Create a new sheets error.
    pub fn sheets(message: impl Into<String>) -> Self {
        Self::Sheets(message.into())
    }
}
