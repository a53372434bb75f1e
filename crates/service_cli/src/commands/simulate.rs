//! Simulate command implementation
//!
//! Calibrates on historical closes, simulates price paths and reports the
//! terminal-price forecast.

use forecast_core::estimation::ReturnStatistics;
use forecast_engine::mc::{ForecastResult, MonteCarloForecaster};
use forecast_engine::rng::ForecastRng;
use std::io::Write;
use std::path::Path;
use tracing::{debug, info};

use crate::config::CliConfig;
use crate::market_data::{load_series, select_window};
use crate::output::{write_simulation, SimulationReport};
use crate::Result;

/// Run the simulate command, writing to stdout
pub fn run(config: &CliConfig, prices: &Path, emit_paths: bool) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    execute(config, prices, emit_paths, &mut out)
}

/// Run the simulate command against an arbitrary sink
pub fn execute<W: Write>(
    config: &CliConfig,
    prices: &Path,
    emit_paths: bool,
    out: &mut W,
) -> Result<()> {
    info!("Starting simulation...");
    info!("  Ticker: {}", config.ticker);
    info!("  Prices: {}", prices.display());
    info!("  Horizon: {} days", config.horizon_days);
    info!("  Paths: {}", config.n_paths);

    let history = load_series(prices)?;
    let series = select_window(&history, config.period, config.window)?;

    let rng = match config.seed {
        Some(seed) => ForecastRng::from_seed(seed),
        None => ForecastRng::from_entropy(),
    };
    let seed = rng.seed();
    debug!(seed, parallel = config.parallel, "Random source ready");

    let mut forecaster = MonteCarloForecaster::new(rng).with_confidence(config.confidence)?;
    if config.parallel {
        forecaster = forecaster.with_parallel_batches(config.batch_size);
    }

    let report = |stats: ReturnStatistics, start_price: f64, forecast: ForecastResult| {
        SimulationReport {
            ticker: &config.ticker,
            period: config.period,
            observations: series.len(),
            start_price,
            horizon_days: config.horizon_days,
            seed,
            stats,
            forecast,
            paths: None,
        }
    };

    if emit_paths || config.parallel {
        let run = forecaster.run(&series, config.horizon_days, config.n_paths)?;
        log_forecast(&run.forecast);

        let mut full = report(run.stats, run.start_price, run.forecast);
        if emit_paths {
            full = full.with_paths(&run.ensemble);
        }
        write_simulation(out, &full, config.format)?;
    } else {
        let run = forecaster.run_terminal_only(&series, config.horizon_days, config.n_paths)?;
        log_forecast(&run.forecast);
        write_simulation(
            out,
            &report(run.stats, run.start_price, run.forecast),
            config.format,
        )?;
    }

    info!("Simulation complete");
    Ok(())
}

fn log_forecast(forecast: &ForecastResult) {
    info!(
        expected = forecast.expected_terminal_price,
        lower = forecast.lower_bound,
        upper = forecast.upper_bound,
        confidence = forecast.confidence_level,
        "Forecast computed"
    );
}
