//! CLI error types.

use std::path::PathBuf;

use lookthrough_core::CoreError;
use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// An input file could not be read.
    #[error("Cannot read {}: {source}", path.display())]
    ReadFile {
        /// File that failed.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// An input file could not be decoded.
    #[error("Invalid input in {}: {source}", path.display())]
    Input {
        /// File that failed.
        path: PathBuf,
        /// Decoding error.
        source: CoreError,
    },

    /// No security matched the requested title.
    #[error("No security matches '{0}'")]
    NoMatch(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
