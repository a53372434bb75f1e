//! End-to-end forecasting workflow.
//!
//! [`MonteCarloForecaster`] chains the three stages of a forecast:
//!
//! 1. estimate drift and volatility from a historical series
//! 2. simulate paths starting from the last observed close
//! 3. reduce the terminal prices to a [`ForecastResult`]

use forecast_core::estimation::{estimate_return_statistics, ReturnStatistics};
use forecast_core::types::{ForecastError, HistoricalSeries};
use serde::Serialize;

use super::config::SimulationConfig;
use super::ensemble::PathEnsemble;
use super::parallel::generate_paths_parallel;
use super::paths::{generate_paths, generate_terminal_prices};
use super::summary::{
    summarise_terminal_prices, summarise_with_confidence, validate_confidence, ForecastResult,
    DEFAULT_CONFIDENCE,
};
use crate::rng::ForecastRng;

/// Output of a full forecasting run.
#[derive(Clone, Debug, PartialEq)]
pub struct ForecastRun {
    /// Statistics estimated from the input series.
    pub stats: ReturnStatistics,
    /// Last observed close, the starting price of every path.
    pub start_price: f64,
    /// Simulated paths.
    pub ensemble: PathEnsemble,
    /// Terminal-price summary.
    pub forecast: ForecastResult,
}

/// Output of a terminal-only run, where paths are not retained.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TerminalForecast {
    /// Statistics estimated from the input series.
    pub stats: ReturnStatistics,
    /// Last observed close, the starting price of every path.
    pub start_price: f64,
    /// Terminal-price summary.
    pub forecast: ForecastResult,
}

/// Monte Carlo forecaster owning its random source.
///
/// # Examples
///
/// ```rust
/// use forecast_core::types::HistoricalSeries;
/// use forecast_engine::mc::MonteCarloForecaster;
/// use forecast_engine::rng::ForecastRng;
///
/// let series = HistoricalSeries::from_closes(vec![100.0, 101.0, 100.5, 102.0, 101.2, 103.1]);
/// let mut forecaster = MonteCarloForecaster::new(ForecastRng::from_seed(42));
///
/// let run = forecaster.run(&series, 30, 200).unwrap();
/// assert_eq!(run.start_price, 103.1);
/// assert_eq!(run.ensemble.shape(), (200, 30));
/// assert!(run.forecast.lower_bound <= run.forecast.upper_bound);
/// ```
#[derive(Clone, Debug)]
pub struct MonteCarloForecaster {
    rng: ForecastRng,
    confidence_level: f64,
    parallel_batch_size: Option<usize>,
}

impl MonteCarloForecaster {
    /// Creates a sequential forecaster at the default confidence level.
    pub fn new(rng: ForecastRng) -> Self {
        Self {
            rng,
            confidence_level: DEFAULT_CONFIDENCE,
            parallel_batch_size: None,
        }
    }

    /// Sets the two-sided confidence level of the reported interval.
    ///
    /// # Errors
    ///
    /// Returns [`ForecastError::InvalidConfig`] if the level is not strictly
    /// between 0 and 1.
    pub fn with_confidence(mut self, confidence_level: f64) -> Result<Self, ForecastError> {
        validate_confidence(confidence_level)?;
        self.confidence_level = confidence_level;
        Ok(self)
    }

    /// Generates dense ensembles on the thread pool in batches of
    /// `batch_size` paths.
    ///
    /// Batch streams are seeded from this forecaster's generator, so a
    /// seeded forecaster stays reproducible for a fixed batch size.
    pub fn with_parallel_batches(mut self, batch_size: usize) -> Self {
        self.parallel_batch_size = Some(batch_size.max(1));
        self
    }

    /// Seed of the owned generator.
    #[inline]
    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    /// Configured confidence level.
    #[inline]
    pub fn confidence_level(&self) -> f64 {
        self.confidence_level
    }

    /// Estimates, simulates and summarises.
    ///
    /// # Errors
    ///
    /// - [`ForecastError::InsufficientData`] if the series has fewer than two
    ///   observations
    /// - [`ForecastError::InvalidPrice`] if a close is not positive and finite
    /// - [`ForecastError::InvalidConfig`] if `horizon_days` or `n_paths` is
    ///   out of range
    pub fn run(
        &mut self,
        series: &HistoricalSeries,
        horizon_days: usize,
        n_paths: usize,
    ) -> Result<ForecastRun, ForecastError> {
        let (stats, config) = self.prepare(series, horizon_days, n_paths)?;

        let ensemble = match self.parallel_batch_size {
            Some(batch_size) => {
                let seed = self.rng.next_seed();
                generate_paths_parallel(&config, seed, batch_size)?
            }
            None => generate_paths(&config, &mut self.rng)?,
        };
        let forecast = summarise_with_confidence(&ensemble, self.confidence_level)?;

        Ok(ForecastRun {
            stats,
            start_price: config.start_price(),
            ensemble,
            forecast,
        })
    }

    /// Like [`run`](Self::run) but keeps only terminal prices.
    ///
    /// Always sequential. Memory is O(n_paths).
    ///
    /// # Errors
    ///
    /// Same as [`run`](Self::run).
    pub fn run_terminal_only(
        &mut self,
        series: &HistoricalSeries,
        horizon_days: usize,
        n_paths: usize,
    ) -> Result<TerminalForecast, ForecastError> {
        let (stats, config) = self.prepare(series, horizon_days, n_paths)?;

        let terminals = generate_terminal_prices(&config, &mut self.rng)?;
        let forecast = summarise_terminal_prices(&terminals, self.confidence_level)?;

        Ok(TerminalForecast {
            stats,
            start_price: config.start_price(),
            forecast,
        })
    }

    fn prepare(
        &self,
        series: &HistoricalSeries,
        horizon_days: usize,
        n_paths: usize,
    ) -> Result<(ReturnStatistics, SimulationConfig), ForecastError> {
        let stats = estimate_return_statistics(series)?;
        let start_price = series.last_close().ok_or(ForecastError::InsufficientData {
            observations: series.len(),
        })?;

        let config = SimulationConfig::builder()
            .start_price(start_price)
            .horizon_days(horizon_days)
            .n_paths(n_paths)
            .stats(stats)
            .build()?;

        Ok((stats, config))
    }
}
