//! Error types for franchise_tfidf
//!
//! Unparseable screen times and characters missing from the allow-list are
//! not errors; they are resolved locally as absent cells and dropped rows.
//! Everything here is fatal for the run.

use thiserror::Error;

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, TfIdfError>;

/// Main error type for franchise_tfidf
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TfIdfError {
    /// A movie present in the matrix has no runtime entry
    #[error("Missing runtime for movie '{movie}'")]
    MissingRuntime { movie: String },

    /// A runtime entry that is not a positive whole number of minutes
    #[error("Invalid runtime for movie '{movie}': '{value}'")]
    InvalidRuntime { movie: String, value: String },

    /// A character reached the statistics stage without any recorded screen time
    #[error("Zero document frequency for character '{character}'")]
    ZeroDocumentFrequency { character: String },

    /// Two aliases of one character both carry a time for the same movie
    #[error("Conflicting screen times for '{character}' in '{movie}'")]
    AliasConflict { character: String, movie: String },

    /// A listing line without the `<time>` markers
    #[error("Malformed appearance in '{movie}': '{line}'")]
    MalformedAppearance { movie: String, line: String },

    /// Configuration validation failed
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// Filesystem error while reading inputs or writing tables
    #[error("I/O error: {message}")]
    Io { message: String },

    /// CSV read/write error
    #[error("CSV error: {message}")]
    Csv { message: String },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    /// Internal error (should not occur in normal usage)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl TfIdfError {
    pub fn missing_runtime(movie: impl Into<String>) -> Self {
        Self::MissingRuntime {
            movie: movie.into(),
        }
    }

    pub fn invalid_runtime(movie: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidRuntime {
            movie: movie.into(),
            value: value.into(),
        }
    }

    pub fn zero_document_frequency(character: impl Into<String>) -> Self {
        Self::ZeroDocumentFrequency {
            character: character.into(),
        }
    }

    pub fn alias_conflict(character: impl Into<String>, movie: impl Into<String>) -> Self {
        Self::AliasConflict {
            character: character.into(),
            movie: movie.into(),
        }
    }

    pub fn malformed_appearance(movie: impl Into<String>, line: impl Into<String>) -> Self {
        Self::MalformedAppearance {
            movie: movie.into(),
            line: line.into(),
        }
    }

    /// Create an invalid config error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Check if this error comes from bad input data rather than the environment
    pub fn is_data_error(&self) -> bool {
        matches!(
            self,
            Self::MissingRuntime { .. }
                | Self::InvalidRuntime { .. }
                | Self::ZeroDocumentFrequency { .. }
                | Self::AliasConflict { .. }
                | Self::MalformedAppearance { .. }
        )
    }
}

impl From<std::io::Error> for TfIdfError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: err.to_string(),
        }
    }
}

impl From<csv::Error> for TfIdfError {
    fn from(err: csv::Error) -> Self {
        Self::Csv {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for TfIdfError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            message: err.to_string(),
        }
    }
}
