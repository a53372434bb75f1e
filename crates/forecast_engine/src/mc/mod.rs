//! Monte Carlo simulation for terminal-price forecasting.
//!
//! This module provides:
//! - [`SimulationConfig`]: validated run configuration with builder
//! - [`PathEnsemble`]: dense row-major storage of simulated paths
//! - [`generate_paths`] / [`generate_terminal_prices`]: sequential generation
//! - [`generate_paths_parallel`]: batched generation on the rayon pool
//! - [`summarise`]: reduction to expected price and confidence interval
//! - [`MonteCarloForecaster`]: estimation, simulation and summary in one call
//!
//! # Example
//!
//! ```rust
//! use forecast_core::estimation::ReturnStatistics;
//! use forecast_engine::mc::{generate_paths, summarise, SimulationConfig};
//! use forecast_engine::rng::ForecastRng;
//!
//! let config = SimulationConfig::builder()
//!     .start_price(100.0)
//!     .horizon_days(180)
//!     .n_paths(500)
//!     .stats(ReturnStatistics::new(0.0005, 0.02))
//!     .build()
//!     .unwrap();
//!
//! let ensemble = generate_paths(&config, &mut ForecastRng::from_seed(42)).unwrap();
//! let forecast = summarise(&ensemble).unwrap();
//!
//! assert!(forecast.lower_bound <= forecast.upper_bound);
//! ```

mod config;
mod ensemble;
mod forecaster;
mod parallel;
mod paths;
mod summary;

pub use config::{SimulationConfig, SimulationConfigBuilder, MAX_HORIZON_DAYS, MAX_PATHS};
pub use ensemble::PathEnsemble;
pub use forecaster::{ForecastRun, MonteCarloForecaster, TerminalForecast};
pub use parallel::{generate_paths_parallel, DEFAULT_BATCH_SIZE};
pub use paths::{generate_paths, generate_terminal_prices, increment_distribution};
pub use summary::{
    summarise, summarise_terminal_prices, summarise_with_confidence, validate_confidence,
    ForecastResult, DEFAULT_CONFIDENCE,
};
