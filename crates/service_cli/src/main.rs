//! Forecast CLI entry point

use clap::{Args, Parser, Subcommand};
use forecast_core::types::LookbackPeriod;
use service_cli::config::{build_config, CliOverrides, LogLevel, OutputFormat};
use service_cli::{commands, CliError};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Monte Carlo stock price forecaster
#[derive(Parser)]
#[command(name = "forecast")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file path (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<LogLevel>,

    #[command(subcommand)]
    command: Commands,
}

/// Options shared by every command
#[derive(Args)]
struct HistoryArgs {
    /// CSV file with date and close columns
    #[arg(short, long)]
    prices: PathBuf,

    /// Ticker symbol shown in the report
    #[arg(short, long)]
    ticker: Option<String>,

    /// Calibration lookback period (1mo, 3mo, 6mo, 1y, 2y)
    #[arg(long)]
    period: Option<LookbackPeriod>,

    /// Keep only the trailing N observations of the period
    #[arg(long)]
    window: Option<usize>,

    /// Output format (table, json)
    #[arg(short, long)]
    format: Option<OutputFormat>,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate price paths and forecast the terminal price
    Simulate {
        #[command(flatten)]
        history: HistoryArgs,

        /// Forecast horizon in days
        #[arg(short, long)]
        days: Option<usize>,

        /// Number of simulated paths
        #[arg(short = 'n', long)]
        paths: Option<usize>,

        /// Seed for a reproducible run
        #[arg(short, long)]
        seed: Option<u64>,

        /// Two-sided confidence level of the interval
        #[arg(long)]
        confidence: Option<f64>,

        /// Include every simulated path in the output
        #[arg(long)]
        emit_paths: bool,

        /// Generate paths on all cores
        #[arg(long)]
        parallel: bool,

        /// Paths per parallel batch
        #[arg(long)]
        batch_size: Option<usize>,
    },

    /// Estimate drift and volatility from historical closes
    Estimate {
        #[command(flatten)]
        history: HistoryArgs,
    },
}

impl Cli {
    fn overrides(&self) -> CliOverrides {
        let history = match &self.command {
            Commands::Simulate { history, .. } | Commands::Estimate { history } => history,
        };
        let mut overrides = CliOverrides {
            config_file: self.config.clone(),
            log_level: self.log_level,
            ticker: history.ticker.clone(),
            period: history.period,
            window: history.window,
            format: history.format,
            ..Default::default()
        };

        if let Commands::Simulate {
            days,
            paths,
            seed,
            confidence,
            parallel,
            batch_size,
            ..
        } = &self.command
        {
            overrides.horizon_days = *days;
            overrides.n_paths = *paths;
            overrides.seed = *seed;
            overrides.confidence = *confidence;
            overrides.parallel = *parallel;
            overrides.batch_size = *batch_size;
        }

        overrides
    }
}

fn init_tracing(level: LogLevel) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_filter_str()));

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = match build_config(&cli.overrides()) {
        Ok(config) => config,
        Err(e) => {
            init_tracing(cli.log_level.unwrap_or_default());
            return ExitCode::from(commands::exit_status::<()>(&Err(CliError::from(e))));
        }
    };

    // Logs go to stderr; stdout carries results only
    init_tracing(config.log_level);

    let result = match &cli.command {
        Commands::Simulate {
            history,
            emit_paths,
            ..
        } => commands::simulate::run(&config, &history.prices, *emit_paths),
        Commands::Estimate { history } => commands::estimate::run(&config, &history.prices),
    };

    ExitCode::from(commands::exit_status(&result))
}
