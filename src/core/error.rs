//! Error types for the offer-search library.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using offer-search's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading tables, building tags, or ranking.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error reading input or writing the report.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A reference table file could not be opened.
    #[error("cannot open table {path}: {source}")]
    Table {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A reference table could not be read or parsed.
    #[error("CSV error in {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// A reference table lacks a required column.
    #[error("Missing column {column} in {path}")]
    MissingColumn { path: PathBuf, column: &'static str },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML rendering error.
    #[error("TOML error: {0}")]
    Toml(#[from] toml::ser::Error),

    /// No offers were loaded, so there is nothing to rank.
    #[error("Offer table is empty; nothing to rank")]
    EmptyCorpus,

    /// The search term is not a known retailer, brand, or category.
    #[error("Search term is not in the database: {term}")]
    NotFound { term: String },

    /// The input source closed before a valid search term was entered.
    #[error("Input closed before a valid search term was entered")]
    InputClosed,
}

impl Error {
    /// Create a new config error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a not-found error for a search term.
    pub fn not_found(term: impl Into<String>) -> Self {
        Self::NotFound { term: term.into() }
    }

    /// Wrap an I/O error with the table path it came from.
    pub fn table(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Table {
            path: path.into(),
            source,
        }
    }

    /// Wrap a csv error with the table path it came from.
    pub fn csv(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        Self::Csv {
            path: path.into(),
            source,
        }
    }
}
