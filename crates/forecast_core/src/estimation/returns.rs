//! Return estimation from closing prices.
//!
//! Derives the per-period drift (mean) and volatility (sample standard
//! deviation) of relative price changes
//!
//! ```text
//! r_t = (P_t - P_{t-1}) / P_{t-1}
//! ```
//!
//! The period is whatever the series' sampling frequency implies; daily bars
//! give daily drift and volatility.

use serde::Serialize;

use crate::math::statistics;
use crate::types::{ForecastError, HistoricalSeries};

/// Minimum number of observations yielding one relative change.
pub const MIN_OBSERVATIONS: usize = 2;

/// Drift and volatility of per-period relative price changes.
///
/// Immutable after construction.
///
/// # Examples
/// ```
/// use forecast_core::estimation::ReturnStatistics;
///
/// let stats = ReturnStatistics::new(0.0005, 0.018);
/// assert_eq!(stats.mean(), 0.0005);
/// assert_eq!(stats.std_dev(), 0.018);
/// assert_eq!(stats.sample_size(), 0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ReturnStatistics {
    mean: f64,
    std_dev: f64,
    sample_size: usize,
}

impl ReturnStatistics {
    /// Creates statistics from known parameters.
    ///
    /// The sample size of directly supplied parameters is zero.
    #[inline]
    pub fn new(mean: f64, std_dev: f64) -> Self {
        Self {
            mean,
            std_dev,
            sample_size: 0,
        }
    }

    /// Estimates statistics from a sample of relative returns.
    ///
    /// A single return has no sample dispersion; its standard deviation is
    /// reported as zero.
    ///
    /// # Errors
    ///
    /// Returns [`ForecastError::InsufficientData`] for an empty sample.
    pub fn from_returns(returns: &[f64]) -> Result<Self, ForecastError> {
        let mean = statistics::mean(returns).ok_or(ForecastError::InsufficientData {
            observations: returns.len() + 1,
        })?;
        let std_dev = statistics::sample_std_dev(returns).unwrap_or(0.0);

        Ok(Self {
            mean,
            std_dev,
            sample_size: returns.len(),
        })
    }

    /// Mean per-period relative change (drift).
    #[inline]
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Sample standard deviation of per-period relative change (volatility).
    #[inline]
    pub fn std_dev(&self) -> f64 {
        self.std_dev
    }

    /// Number of returns the statistics were derived from.
    #[inline]
    pub fn sample_size(&self) -> usize {
        self.sample_size
    }

    /// Returns `true` if both parameters are finite and the volatility is
    /// non-negative.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.mean.is_finite() && self.std_dev.is_finite() && self.std_dev >= 0.0
    }
}

/// Relative period-over-period changes of a price sequence.
///
/// # Errors
///
/// - [`ForecastError::InsufficientData`] if fewer than two prices are given
/// - [`ForecastError::InvalidPrice`] if any price is not positive and finite
///
/// # Examples
/// ```
/// use forecast_core::estimation::relative_returns;
///
/// let returns = relative_returns(&[100.0, 110.0, 99.0]).unwrap();
/// assert_eq!(returns.len(), 2);
/// assert!((returns[0] - 0.1).abs() < 1e-12);
/// assert!((returns[1] + 0.1).abs() < 1e-12);
/// ```
pub fn relative_returns(closes: &[f64]) -> Result<Vec<f64>, ForecastError> {
    if closes.len() < MIN_OBSERVATIONS {
        return Err(ForecastError::InsufficientData {
            observations: closes.len(),
        });
    }

    if let Some((index, &price)) = closes
        .iter()
        .enumerate()
        .find(|(_, price)| !(**price > 0.0 && price.is_finite()))
    {
        return Err(ForecastError::InvalidPrice { index, price });
    }

    Ok(closes
        .windows(2)
        .map(|pair| (pair[1] - pair[0]) / pair[0])
        .collect())
}

/// Estimates drift and volatility from a historical series.
///
/// # Errors
///
/// Fails with [`ForecastError::InsufficientData`] for a series shorter than
/// two observations and [`ForecastError::InvalidPrice`] for a non-positive
/// price. Length is checked first.
pub fn estimate_return_statistics(
    series: &HistoricalSeries,
) -> Result<ReturnStatistics, ForecastError> {
    let returns = relative_returns(series.closes())?;
    ReturnStatistics::from_returns(&returns)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_relative_returns_scenario() {
        let returns = relative_returns(&[100.0, 102.0, 101.0, 105.0, 104.0]).unwrap();

        assert_eq!(returns.len(), 4);
        assert_relative_eq!(returns[0], 0.02, epsilon = 1e-15);
        assert_relative_eq!(returns[1], -1.0 / 102.0, epsilon = 1e-15);
        assert_relative_eq!(returns[2], 4.0 / 101.0, epsilon = 1e-15);
        assert_relative_eq!(returns[3], -1.0 / 105.0, epsilon = 1e-15);
    }

    #[test]
    fn test_estimate_scenario() {
        let series = HistoricalSeries::from_closes(vec![100.0, 102.0, 101.0, 105.0, 104.0]);
        let stats = estimate_return_statistics(&series).unwrap();

        let r = [0.02, -1.0 / 102.0, 4.0 / 101.0, -1.0 / 105.0];
        let mean = r.iter().sum::<f64>() / 4.0;
        let var = r.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / 3.0;

        assert_eq!(stats.sample_size(), 4);
        assert_relative_eq!(stats.mean(), mean, epsilon = 1e-15);
        assert_relative_eq!(stats.std_dev(), var.sqrt(), epsilon = 1e-15);
        assert!(stats.is_valid());
    }

    #[test]
    fn test_single_observation_is_insufficient() {
        let series = HistoricalSeries::from_closes(vec![100.0]);
        assert_eq!(
            estimate_return_statistics(&series),
            Err(ForecastError::InsufficientData { observations: 1 })
        );
    }

    #[test]
    fn test_empty_series_is_insufficient() {
        let series = HistoricalSeries::default();
        assert_eq!(
            estimate_return_statistics(&series),
            Err(ForecastError::InsufficientData { observations: 0 })
        );
    }

    #[test]
    fn test_two_observations_zero_std_dev() {
        let series = HistoricalSeries::from_closes(vec![100.0, 101.0]);
        let stats = estimate_return_statistics(&series).unwrap();

        assert_relative_eq!(stats.mean(), 0.01, epsilon = 1e-15);
        assert_eq!(stats.std_dev(), 0.0);
        assert_eq!(stats.sample_size(), 1);
    }

    #[test]
    fn test_non_positive_price_rejected() {
        let series = HistoricalSeries::from_closes(vec![100.0, 0.0, 101.0]);
        assert_eq!(
            estimate_return_statistics(&series),
            Err(ForecastError::InvalidPrice {
                index: 1,
                price: 0.0
            })
        );

        let series = HistoricalSeries::from_closes(vec![100.0, 101.0, -3.0]);
        assert!(matches!(
            estimate_return_statistics(&series),
            Err(ForecastError::InvalidPrice { index: 2, .. })
        ));
    }

    #[test]
    fn test_nan_price_rejected() {
        let result = relative_returns(&[100.0, f64::NAN]);
        assert!(matches!(
            result,
            Err(ForecastError::InvalidPrice { index: 1, .. })
        ));
    }

    #[test]
    fn test_length_checked_before_prices() {
        assert_eq!(
            relative_returns(&[-1.0]),
            Err(ForecastError::InsufficientData { observations: 1 })
        );
    }

    #[test]
    fn test_constant_prices() {
        let series = HistoricalSeries::from_closes(vec![50.0; 20]);
        let stats = estimate_return_statistics(&series).unwrap();
        assert_eq!(stats.mean(), 0.0);
        assert_eq!(stats.std_dev(), 0.0);
    }

    #[test]
    fn test_from_returns_empty() {
        assert_eq!(
            ReturnStatistics::from_returns(&[]),
            Err(ForecastError::InsufficientData { observations: 1 })
        );
    }

    #[test]
    fn test_is_valid() {
        assert!(ReturnStatistics::new(0.0, 0.0).is_valid());
        assert!(!ReturnStatistics::new(0.0, -0.1).is_valid());
        assert!(!ReturnStatistics::new(f64::NAN, 0.1).is_valid());
        assert!(!ReturnStatistics::new(0.0, f64::INFINITY).is_valid());
    }
}
