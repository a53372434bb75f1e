//! Parameter estimation from historical prices.
//!
//! - [`returns`]: per-period drift and volatility of relative price changes

pub mod returns;

pub use returns::{estimate_return_statistics, relative_returns, ReturnStatistics, MIN_OBSERVATIONS};
