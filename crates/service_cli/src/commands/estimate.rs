//! Estimate command implementation
//!
//! Reports the drift and volatility calibrated from historical closes.

use forecast_core::estimation::estimate_return_statistics;
use std::io::Write;
use std::path::Path;
use tracing::info;

use crate::config::CliConfig;
use crate::market_data::{load_series, select_window};
use crate::output::{write_estimate, EstimateReport};
use crate::Result;

/// Run the estimate command, writing to stdout
pub fn run(config: &CliConfig, prices: &Path) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    execute(config, prices, &mut out)
}

/// Run the estimate command against an arbitrary sink
pub fn execute<W: Write>(config: &CliConfig, prices: &Path, out: &mut W) -> Result<()> {
    info!("Starting estimation...");
    info!("  Ticker: {}", config.ticker);
    info!("  Prices: {}", prices.display());
    info!("  Period: {}", config.period);

    let history = load_series(prices)?;
    let series = select_window(&history, config.period, config.window)?;
    let stats = estimate_return_statistics(&series)?;

    info!(
        drift = stats.mean(),
        volatility = stats.std_dev(),
        returns = stats.sample_size(),
        "Estimation complete"
    );

    let dates = series.dates();
    let report = EstimateReport {
        ticker: &config.ticker,
        period: config.period,
        observations: series.len(),
        first_date: dates.and_then(|d| d.first().copied()),
        last_date: dates.and_then(|d| d.last().copied()),
        stats,
    };
    write_estimate(out, &report, config.format)
}
