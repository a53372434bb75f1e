//! Error types for structured error handling.
//!
//! All failures in the forecasting pipeline are deterministic validation
//! failures. They are raised at the point of detection and propagated to the
//! caller unmodified; nothing is retried and no defaults are substituted.

use thiserror::Error;

/// Categorised forecasting errors.
///
/// # Variants
/// - `InsufficientData`: history too short to derive return statistics
/// - `InvalidPrice`: a non-positive or non-finite price in the history
/// - `InvalidConfig`: simulation parameters outside their valid domain
/// - `EmptyEnsemble`: nothing to summarise
/// - `InvalidSeries`: malformed dated series
///
/// # Examples
/// ```
/// use forecast_core::types::ForecastError;
///
/// let err = ForecastError::InsufficientData { observations: 1 };
/// assert_eq!(
///     format!("{}", err),
///     "Insufficient data: 1 observation(s), at least 2 required"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ForecastError {
    /// The series yields no relative price change.
    #[error("Insufficient data: {observations} observation(s), at least 2 required")]
    InsufficientData {
        /// Number of observations that were supplied.
        observations: usize,
    },

    /// A price is zero, negative or not finite.
    #[error("Invalid price {price} at index {index}: prices must be positive and finite")]
    InvalidPrice {
        /// Position of the offending price in the series.
        index: usize,
        /// The offending price.
        price: f64,
    },

    /// A simulation parameter is outside its valid domain.
    #[error("Invalid configuration '{name}': {reason}")]
    InvalidConfig {
        /// Parameter name.
        name: &'static str,
        /// Description of the invalid value.
        reason: String,
    },

    /// The ensemble contains no paths.
    #[error("Empty ensemble: no simulated paths to summarise")]
    EmptyEnsemble,

    /// Dates and prices do not describe a valid series.
    #[error("Invalid series: {0}")]
    InvalidSeries(String),
}

impl ForecastError {
    /// Create an invalid configuration error.
    pub fn invalid_config(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            name,
            reason: reason.into(),
        }
    }

    /// Create an invalid series error.
    pub fn invalid_series(msg: impl Into<String>) -> Self {
        Self::InvalidSeries(msg.into())
    }
}
