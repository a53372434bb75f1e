//! # forecast_core: Foundation Layer for Stock Price Forecasting
//!
//! ## Layer 1 (Foundation) Role
//!
//! forecast_core is the bottom layer of the forecasting workspace, providing:
//! - Historical price series and lookback windows (`types::series`, `types::period`)
//! - The error taxonomy shared by every layer (`types::error`)
//! - Descriptive statistics: mean, sample standard deviation, percentiles (`math::statistics`)
//! - Return estimation: drift and volatility from closing prices (`estimation::returns`)
//!
//! ## Purity
//!
//! Nothing in this crate performs I/O, logging or random number generation.
//! Every operation is a pure function over its numeric inputs, so the crate
//! can be reused by the simulation engine and by any front end.
//!
//! ## Usage Examples
//!
//! ```rust
//! use forecast_core::estimation::estimate_return_statistics;
//! use forecast_core::types::HistoricalSeries;
//!
//! let series = HistoricalSeries::from_closes(vec![100.0, 102.0, 101.0, 105.0, 104.0]);
//! let stats = estimate_return_statistics(&series).unwrap();
//!
//! assert_eq!(stats.sample_size(), 4);
//! assert!(stats.std_dev() > 0.0);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod estimation;
pub mod math;
pub mod types;
