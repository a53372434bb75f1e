//! Monte Carlo simulation configuration.
//!
//! This module provides [`SimulationConfig`] and its builder. Every field is
//! required: defaults for horizon and path count belong to the front end,
//! not to the engine.

use forecast_core::estimation::ReturnStatistics;
use forecast_core::types::ForecastError;

/// Maximum number of simulation paths allowed.
pub const MAX_PATHS: usize = 10_000_000;

/// Maximum number of steps allowed per path.
pub const MAX_HORIZON_DAYS: usize = 100_000;

/// Monte Carlo simulation configuration.
///
/// Immutable configuration specifying one simulation run. Use
/// [`SimulationConfigBuilder`] or [`SimulationConfig::new`] to construct
/// instances; both validate.
///
/// # Examples
///
/// ```rust
/// use forecast_core::estimation::ReturnStatistics;
/// use forecast_engine::mc::SimulationConfig;
///
/// let config = SimulationConfig::builder()
///     .start_price(187.5)
///     .horizon_days(180)
///     .n_paths(500)
///     .stats(ReturnStatistics::new(0.0008, 0.017))
///     .build()
///     .expect("valid configuration");
///
/// assert_eq!(config.horizon_days(), 180);
/// assert_eq!(config.n_paths(), 500);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimulationConfig {
    /// Price every path starts from.
    start_price: f64,
    /// Number of steps per path, including the starting step.
    horizon_days: usize,
    /// Number of independent paths.
    n_paths: usize,
    /// Drift and volatility of the per-step log increment.
    stats: ReturnStatistics,
}

impl SimulationConfig {
    /// Creates a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ForecastError::InvalidConfig`] under the conditions listed
    /// on [`SimulationConfig::validate`].
    pub fn new(
        start_price: f64,
        horizon_days: usize,
        n_paths: usize,
        stats: ReturnStatistics,
    ) -> Result<Self, ForecastError> {
        let config = Self {
            start_price,
            horizon_days,
            n_paths,
            stats,
        };
        config.validate()?;
        Ok(config)
    }

    /// Creates a new configuration builder.
    #[inline]
    pub fn builder() -> SimulationConfigBuilder {
        SimulationConfigBuilder::default()
    }

    /// Returns the starting price.
    #[inline]
    pub fn start_price(&self) -> f64 {
        self.start_price
    }

    /// Returns the number of steps per path.
    #[inline]
    pub fn horizon_days(&self) -> usize {
        self.horizon_days
    }

    /// Returns the number of simulation paths.
    #[inline]
    pub fn n_paths(&self) -> usize {
        self.n_paths
    }

    /// Returns the return statistics driving the increments.
    #[inline]
    pub fn stats(&self) -> ReturnStatistics {
        self.stats
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ForecastError::InvalidConfig`] if:
    /// - `start_price` is not positive and finite
    /// - `horizon_days` is 0 or greater than [`MAX_HORIZON_DAYS`]
    /// - `n_paths` is 0 or greater than [`MAX_PATHS`]
    /// - the statistics are not finite or the volatility is negative
    pub fn validate(&self) -> Result<(), ForecastError> {
        if !(self.start_price > 0.0 && self.start_price.is_finite()) {
            return Err(ForecastError::invalid_config(
                "start_price",
                format!("must be positive and finite, got {}", self.start_price),
            ));
        }
        if self.horizon_days == 0 || self.horizon_days > MAX_HORIZON_DAYS {
            return Err(ForecastError::invalid_config(
                "horizon_days",
                format!(
                    "must be in range [1, {}], got {}",
                    MAX_HORIZON_DAYS, self.horizon_days
                ),
            ));
        }
        if self.n_paths == 0 || self.n_paths > MAX_PATHS {
            return Err(ForecastError::invalid_config(
                "n_paths",
                format!("must be in range [1, {}], got {}", MAX_PATHS, self.n_paths),
            ));
        }
        if !self.stats.is_valid() {
            return Err(ForecastError::invalid_config(
                "stats",
                format!(
                    "mean and std_dev must be finite with std_dev >= 0, got ({}, {})",
                    self.stats.mean(),
                    self.stats.std_dev()
                ),
            ));
        }
        Ok(())
    }

    /// Number of cells in the dense ensemble (`n_paths * horizon_days`).
    #[inline]
    pub fn n_cells(&self) -> usize {
        self.n_paths * self.horizon_days
    }
}

/// Builder for [`SimulationConfig`].
///
/// Provides a fluent API with validation at build time.
#[derive(Clone, Debug, Default)]
pub struct SimulationConfigBuilder {
    start_price: Option<f64>,
    horizon_days: Option<usize>,
    n_paths: Option<usize>,
    stats: Option<ReturnStatistics>,
}

impl SimulationConfigBuilder {
    /// Sets the starting price (normally the last observed close).
    #[inline]
    pub fn start_price(mut self, start_price: f64) -> Self {
        self.start_price = Some(start_price);
        self
    }

    /// Sets the number of steps per path.
    #[inline]
    pub fn horizon_days(mut self, horizon_days: usize) -> Self {
        self.horizon_days = Some(horizon_days);
        self
    }

    /// Sets the number of simulation paths.
    #[inline]
    pub fn n_paths(mut self, n_paths: usize) -> Self {
        self.n_paths = Some(n_paths);
        self
    }

    /// Sets the return statistics.
    #[inline]
    pub fn stats(mut self, stats: ReturnStatistics) -> Self {
        self.stats = Some(stats);
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ForecastError::InvalidConfig`] if a field is missing or
    /// invalid.
    pub fn build(self) -> Result<SimulationConfig, ForecastError> {
        let start_price = self
            .start_price
            .ok_or_else(|| ForecastError::invalid_config("start_price", "must be specified"))?;
        let horizon_days = self
            .horizon_days
            .ok_or_else(|| ForecastError::invalid_config("horizon_days", "must be specified"))?;
        let n_paths = self
            .n_paths
            .ok_or_else(|| ForecastError::invalid_config("n_paths", "must be specified"))?;
        let stats = self
            .stats
            .ok_or_else(|| ForecastError::invalid_config("stats", "must be specified"))?;

        SimulationConfig::new(start_price, horizon_days, n_paths, stats)
    }
}
