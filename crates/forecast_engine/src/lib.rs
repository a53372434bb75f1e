//! # forecast_engine: Monte Carlo Path Simulation
//!
//! ## Layer 2 (Engine) Role
//!
//! forecast_engine builds on forecast_core and provides:
//! - Seeded random sources with independent per-batch streams (`rng`)
//! - Geometric random walk path generation, dense and terminal-only (`mc`)
//! - Parallel batched generation via rayon (`mc::generate_paths_parallel`)
//! - Terminal-price summaries with empirical confidence bounds (`mc::summarise`)
//!
//! ## Reproducibility
//!
//! Every generator is constructed from an explicit seed and owned by exactly
//! one run. Identical seeds, configurations and batch sizes produce
//! bit-identical ensembles.
//!
//! ## Usage Examples
//!
//! ```rust
//! use forecast_core::types::HistoricalSeries;
//! use forecast_engine::mc::MonteCarloForecaster;
//! use forecast_engine::rng::ForecastRng;
//!
//! let series = HistoricalSeries::from_closes(vec![100.0, 102.0, 101.0, 105.0, 104.0]);
//! let mut forecaster = MonteCarloForecaster::new(ForecastRng::from_seed(2024));
//!
//! let run = forecaster.run(&series, 180, 500).unwrap();
//! println!(
//!     "expected {:.2} in [{:.2}, {:.2}]",
//!     run.forecast.expected_terminal_price, run.forecast.lower_bound, run.forecast.upper_bound
//! );
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod mc;
pub mod rng;
