//! Core data types for the forecasting workspace.
//!
//! This module provides:
//! - [`HistoricalSeries`]: ordered closing prices, optionally dated
//! - [`LookbackPeriod`]: calendar windows used to select calibration history
//! - [`ForecastError`]: the error taxonomy shared by every layer

pub mod error;
pub mod period;
pub mod series;

pub use error::ForecastError;
pub use period::LookbackPeriod;
pub use series::HistoricalSeries;
