//! Forecast CLI - Command Line Operations for Monte Carlo Price Forecasting
//!
//! # Commands
//!
//! - `forecast simulate --prices <file>` - Simulate paths and report a terminal-price forecast
//! - `forecast estimate --prices <file>` - Report calibrated drift and volatility
//!
//! # Architecture
//!
//! As the **S**ervice layer of the workspace, this crate owns every concern
//! the pure layers leave out: configuration, price file loading, logging and
//! output rendering. It orchestrates `forecast_core` and `forecast_engine`.

pub mod commands;
pub mod config;
pub mod error;
pub mod market_data;
pub mod output;

pub use error::{CliError, Result};
