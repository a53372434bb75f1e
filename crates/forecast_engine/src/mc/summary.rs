//! Reduction of an ensemble to a terminal-price forecast.
//!
//! The expected price is the arithmetic mean of terminal prices. The bounds
//! are the empirical `(1 - c) / 2` and `1 - (1 - c) / 2` percentiles with
//! linear interpolation between order statistics, so the default 95 % level
//! reports the 2.5th and 97.5th percentiles.

use forecast_core::math::statistics::{mean, percentile_sorted};
use forecast_core::types::ForecastError;
use serde::Serialize;

use super::ensemble::PathEnsemble;

/// Default two-sided confidence level.
pub const DEFAULT_CONFIDENCE: f64 = 0.95;

/// Terminal-price forecast with an empirical confidence interval.
///
/// # Examples
///
/// ```rust
/// use forecast_engine::mc::ForecastResult;
///
/// let result = ForecastResult {
///     expected_terminal_price: 104.2,
///     lower_bound: 81.0,
///     upper_bound: 131.5,
///     confidence_level: 0.95,
///     n_paths: 500,
/// };
///
/// assert!(result.contains(100.0));
/// assert!((result.interval_width() - 50.5).abs() < 1e-12);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ForecastResult {
    /// Mean of the terminal prices.
    pub expected_terminal_price: f64,
    /// Lower-tail percentile of the terminal prices.
    pub lower_bound: f64,
    /// Upper-tail percentile of the terminal prices.
    pub upper_bound: f64,
    /// Two-sided confidence level the bounds correspond to.
    pub confidence_level: f64,
    /// Number of terminal prices summarised.
    pub n_paths: usize,
}

impl ForecastResult {
    /// Width of the confidence interval.
    #[inline]
    pub fn interval_width(&self) -> f64 {
        self.upper_bound - self.lower_bound
    }

    /// Returns `true` if `price` lies inside the closed interval.
    #[inline]
    pub fn contains(&self, price: f64) -> bool {
        (self.lower_bound..=self.upper_bound).contains(&price)
    }
}

/// Summarises an ensemble at the default 95 % confidence level.
///
/// # Errors
///
/// Returns [`ForecastError::EmptyEnsemble`] if the ensemble has no paths.
///
/// # Examples
///
/// ```rust
/// use forecast_engine::mc::{summarise, PathEnsemble};
///
/// let ensemble = PathEnsemble::from_vec(vec![100.0; 30], 3, 10).unwrap();
/// let forecast = summarise(&ensemble).unwrap();
///
/// assert_eq!(forecast.expected_terminal_price, 100.0);
/// assert_eq!(forecast.lower_bound, 100.0);
/// assert_eq!(forecast.upper_bound, 100.0);
/// ```
pub fn summarise(ensemble: &PathEnsemble) -> Result<ForecastResult, ForecastError> {
    summarise_with_confidence(ensemble, DEFAULT_CONFIDENCE)
}

/// Summarises an ensemble at an explicit confidence level.
///
/// # Errors
///
/// Returns [`ForecastError::EmptyEnsemble`] if the ensemble has no paths and
/// [`ForecastError::InvalidConfig`] if `confidence_level` is not strictly
/// between 0 and 1.
pub fn summarise_with_confidence(
    ensemble: &PathEnsemble,
    confidence_level: f64,
) -> Result<ForecastResult, ForecastError> {
    summarise_terminal_prices(&ensemble.terminal_prices(), confidence_level)
}

/// Summarises a vector of terminal prices.
///
/// Used directly by the streaming terminal-only generator.
///
/// # Errors
///
/// Returns [`ForecastError::EmptyEnsemble`] if `terminal_prices` is empty
/// and [`ForecastError::InvalidConfig`] if `confidence_level` is not
/// strictly between 0 and 1.
pub fn summarise_terminal_prices(
    terminal_prices: &[f64],
    confidence_level: f64,
) -> Result<ForecastResult, ForecastError> {
    validate_confidence(confidence_level)?;

    let expected_terminal_price = mean(terminal_prices).ok_or(ForecastError::EmptyEnsemble)?;

    let mut sorted = terminal_prices.to_vec();
    sorted.sort_by(f64::total_cmp);

    let tail = (1.0 - confidence_level) / 2.0;
    let lower_bound = percentile_sorted(&sorted, tail).ok_or(ForecastError::EmptyEnsemble)?;
    let upper_bound =
        percentile_sorted(&sorted, 1.0 - tail).ok_or(ForecastError::EmptyEnsemble)?;

    Ok(ForecastResult {
        expected_terminal_price,
        lower_bound,
        upper_bound,
        confidence_level,
        n_paths: terminal_prices.len(),
    })
}

/// Checks a two-sided confidence level lies in the open interval (0, 1).
///
/// # Errors
///
/// Returns [`ForecastError::InvalidConfig`] named `confidence` otherwise.
pub fn validate_confidence(confidence_level: f64) -> Result<(), ForecastError> {
    if confidence_level > 0.0 && confidence_level < 1.0 {
        Ok(())
    } else {
        Err(ForecastError::invalid_config(
            "confidence",
            format!("must be in (0, 1), got {}", confidence_level),
        ))
    }
}
