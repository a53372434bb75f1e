//! Path generation for Monte Carlo simulation.
//!
//! This module implements the discretised geometric random walk
//!
//! ```text
//! S(t) = S(t-1) × exp(Z_t),    Z_t ~ N(mean, std_dev²) i.i.d.
//! ```
//!
//! where `mean` and `std_dev` are the estimated per-period return
//! statistics. Log prices move by i.i.d. normal increments, so every price
//! is log-normal and strictly positive for finite draws. No clamping is
//! applied.
//!
//! # Draw Order
//!
//! Draws are consumed path-major: all increments of path 0, then path 1, and
//! so on. The dense and streaming generators share this order, so for the
//! same seed the streaming terminal prices equal the dense ensemble's
//! terminal column bit for bit.

use forecast_core::estimation::ReturnStatistics;
use forecast_core::types::ForecastError;
use rand_distr::Normal;

use super::config::SimulationConfig;
use super::ensemble::PathEnsemble;
use crate::rng::ForecastRng;

/// Distribution of the per-step log increment.
///
/// # Errors
///
/// Returns [`ForecastError::InvalidConfig`] if the statistics cannot
/// parameterise a normal distribution.
pub fn increment_distribution(stats: ReturnStatistics) -> Result<Normal<f64>, ForecastError> {
    Normal::new(stats.mean(), stats.std_dev())
        .map_err(|e| ForecastError::invalid_config("stats", e.to_string()))
}

/// Evolves one path in place from `start_price`.
///
/// `path[0]` is set to the starting price and each later cell to the
/// previous one times `exp(z)`.
#[inline]
pub(crate) fn evolve_path(
    path: &mut [f64],
    start_price: f64,
    increments: &Normal<f64>,
    rng: &mut ForecastRng,
) {
    if path.is_empty() {
        return;
    }
    path[0] = start_price;
    for step in 1..path.len() {
        let z = rng.sample(increments);
        path[step] = path[step - 1] * z.exp();
    }
}

/// Generates the dense ensemble of `n_paths × horizon_days` prices.
///
/// # Arguments
///
/// * `config` - Validated simulation configuration
/// * `rng` - Random source owned by this run
///
/// # Errors
///
/// Returns [`ForecastError::InvalidConfig`] if the configuration is invalid.
///
/// # Performance
///
/// O(n_paths × horizon_days) time and memory; the buffer is allocated once
/// before the loop.
///
/// # Examples
///
/// ```rust
/// use forecast_core::estimation::ReturnStatistics;
/// use forecast_engine::mc::{generate_paths, SimulationConfig};
/// use forecast_engine::rng::ForecastRng;
///
/// let config = SimulationConfig::new(100.0, 252, 1_000, ReturnStatistics::new(0.0004, 0.015)).unwrap();
/// let mut rng = ForecastRng::from_seed(42);
///
/// let ensemble = generate_paths(&config, &mut rng).unwrap();
/// assert_eq!(ensemble.shape(), (1_000, 252));
/// assert!(ensemble.as_slice().iter().all(|&p| p > 0.0));
/// ```
pub fn generate_paths(
    config: &SimulationConfig,
    rng: &mut ForecastRng,
) -> Result<PathEnsemble, ForecastError> {
    config.validate()?;
    let increments = increment_distribution(config.stats())?;

    let horizon_days = config.horizon_days();
    let start_price = config.start_price();
    let mut ensemble = PathEnsemble::zeroed(config.n_paths(), horizon_days);

    for path in ensemble.as_mut_slice().chunks_exact_mut(horizon_days) {
        evolve_path(path, start_price, &increments, rng);
    }

    Ok(ensemble)
}

/// Generates terminal prices only, without materialising the ensemble.
///
/// Memory is O(n_paths). The random source is consumed in the same order as
/// [`generate_paths`], so the result equals
/// `generate_paths(config, rng)?.terminal_prices()` for an identically
/// seeded generator.
///
/// # Errors
///
/// Returns [`ForecastError::InvalidConfig`] if the configuration is invalid.
pub fn generate_terminal_prices(
    config: &SimulationConfig,
    rng: &mut ForecastRng,
) -> Result<Vec<f64>, ForecastError> {
    config.validate()?;
    let increments = increment_distribution(config.stats())?;

    let start_price = config.start_price();
    let horizon_days = config.horizon_days();

    Ok((0..config.n_paths())
        .map(|_| {
            let mut price = start_price;
            for _ in 1..horizon_days {
                let z = rng.sample(&increments);
                price *= z.exp();
            }
            price
        })
        .collect())
}
