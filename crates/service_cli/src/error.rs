//! Error types for the forecast CLI.

use forecast_core::types::ForecastError;
use thiserror::Error;

use crate::config::ConfigError;

/// CLI error type
#[derive(Debug, Error)]
pub enum CliError {
    /// Estimation, simulation or summary failure
    #[error("Forecast error: {0}")]
    Forecast(#[from] ForecastError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Input file does not exist
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Malformed CSV
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Unparseable value in a price file
    #[error("Parse error at line {line}: {message}")]
    Parse {
        /// 1-based line number in the input file
        line: usize,
        /// Description of the problem
        message: String,
    },

    /// Invalid command-line argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// JSON serialisation error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Create a parse error
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }

    /// Create an invalid argument error
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }
}

/// Result alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;
