//! CLI configuration management
//!
//! Handles loading configuration from TOML files, `FORECAST_*` environment
//! variables and command-line flags.

use forecast_core::types::LookbackPeriod;
use forecast_engine::mc::{DEFAULT_BATCH_SIZE, DEFAULT_CONFIDENCE, MAX_HORIZON_DAYS, MAX_PATHS};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

const ENV_TICKER: &str = "FORECAST_TICKER";
const ENV_PERIOD: &str = "FORECAST_PERIOD";
const ENV_WINDOW: &str = "FORECAST_WINDOW";
const ENV_DAYS: &str = "FORECAST_DAYS";
const ENV_PATHS: &str = "FORECAST_PATHS";
const ENV_SEED: &str = "FORECAST_SEED";
const ENV_CONFIDENCE: &str = "FORECAST_CONFIDENCE";
const ENV_PARALLEL: &str = "FORECAST_PARALLEL";
const ENV_BATCH_SIZE: &str = "FORECAST_BATCH_SIZE";
const ENV_LOG_LEVEL: &str = "FORECAST_LOG_LEVEL";
const ENV_FORMAT: &str = "FORECAST_FORMAT";

/// Configuration error types
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid output format: {0}. Must be one of: table, json")]
    InvalidFormat(String),

    #[error("Invalid value for {name}: {reason}")]
    InvalidValue { name: &'static str, reason: String },

    #[error("{name} must be between {min} and {max}, got {value}")]
    OutOfRange {
        name: &'static str,
        value: usize,
        min: usize,
        max: usize,
    },

    #[error("Configuration file error: {0}")]
    FileError(String),

    #[error("Environment variable error: {0}")]
    EnvError(String),
}

/// Log levels supported by the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(ConfigError::InvalidLogLevel(s.to_string())),
        }
    }
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

/// Output format for forecast results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            _ => Err(ConfigError::InvalidFormat(s.to_string())),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Bounds on user-requested horizon and path count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SimulationLimits {
    /// Shortest allowed horizon in days
    pub min_horizon_days: usize,
    /// Longest allowed horizon in days
    pub max_horizon_days: usize,
    /// Fewest allowed paths
    pub min_paths: usize,
    /// Most allowed paths
    pub max_paths: usize,
}

impl Default for SimulationLimits {
    fn default() -> Self {
        Self {
            min_horizon_days: 30,
            max_horizon_days: 365,
            min_paths: 100,
            max_paths: 1000,
        }
    }
}

impl SimulationLimits {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.min_horizon_days == 0
            || self.min_horizon_days > self.max_horizon_days
            || self.max_horizon_days > MAX_HORIZON_DAYS
        {
            return Err(ConfigError::InvalidValue {
                name: "limits",
                reason: format!(
                    "horizon bounds [{}, {}] must satisfy 1 <= min <= max <= {}",
                    self.min_horizon_days, self.max_horizon_days, MAX_HORIZON_DAYS
                ),
            });
        }
        if self.min_paths == 0 || self.min_paths > self.max_paths || self.max_paths > MAX_PATHS {
            return Err(ConfigError::InvalidValue {
                name: "limits",
                reason: format!(
                    "path bounds [{}, {}] must satisfy 1 <= min <= max <= {}",
                    self.min_paths, self.max_paths, MAX_PATHS
                ),
            });
        }
        Ok(())
    }
}

/// Forecast CLI configuration structure
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Ticker symbol shown in reports
    pub ticker: String,
    /// Calibration lookback period
    pub period: LookbackPeriod,
    /// Optional trailing observation count applied after the period
    pub window: Option<usize>,
    /// Forecast horizon in days (steps per path)
    pub horizon_days: usize,
    /// Number of simulated paths
    pub n_paths: usize,
    /// Two-sided confidence level of the reported interval
    pub confidence: f64,
    /// Seed for reproducible runs; drawn from entropy when absent
    pub seed: Option<u64>,
    /// Generate paths on the rayon thread pool
    pub parallel: bool,
    /// Paths per parallel batch
    pub batch_size: usize,
    /// Log level
    #[serde(deserialize_with = "deserialize_log_level")]
    pub log_level: LogLevel,
    /// Output format
    #[serde(deserialize_with = "deserialize_format")]
    pub format: OutputFormat,
    /// Horizon and path count bounds
    pub limits: SimulationLimits,
}

fn deserialize_log_level<'de, D>(deserializer: D) -> Result<LogLevel, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    LogLevel::from_str(&s).map_err(serde::de::Error::custom)
}

fn deserialize_format<'de, D>(deserializer: D) -> Result<OutputFormat, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    OutputFormat::from_str(&s).map_err(serde::de::Error::custom)
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            ticker: "AAPL".to_string(),
            period: LookbackPeriod::OneYear,
            window: None,
            horizon_days: 180,
            n_paths: 500,
            confidence: DEFAULT_CONFIDENCE,
            seed: None,
            parallel: false,
            batch_size: DEFAULT_BATCH_SIZE,
            log_level: LogLevel::Info,
            format: OutputFormat::Table,
            limits: SimulationLimits::default(),
        }
    }
}

fn parse_env<T: FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::EnvError(format!("{}={:?} is not a valid value", key, value)))
}

fn parse_flag(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        _ => Err(ConfigError::EnvError(format!(
            "{}={:?} is not a valid value (expected true, false, 1 or 0)",
            key, value
        ))),
    }
}

impl CliConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileError(format!("Failed to read config file: {}", e)))?;

        toml::from_str(&content)
            .map_err(|e| ConfigError::FileError(format!("Failed to parse TOML: {}", e)))
    }

    /// Apply `FORECAST_*` variables from the process environment
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_env_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply `FORECAST_*` variables resolved through `lookup`
    pub fn apply_env_overrides_from<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(ticker) = lookup(ENV_TICKER) {
            self.ticker = ticker.trim().to_string();
        }
        if let Some(period) = lookup(ENV_PERIOD) {
            self.period = period.parse().map_err(|e: forecast_core::types::ForecastError| {
                ConfigError::EnvError(format!("{}: {}", ENV_PERIOD, e))
            })?;
        }
        if let Some(window) = lookup(ENV_WINDOW) {
            self.window = Some(parse_env(ENV_WINDOW, &window)?);
        }
        if let Some(days) = lookup(ENV_DAYS) {
            self.horizon_days = parse_env(ENV_DAYS, &days)?;
        }
        if let Some(paths) = lookup(ENV_PATHS) {
            self.n_paths = parse_env(ENV_PATHS, &paths)?;
        }
        if let Some(seed) = lookup(ENV_SEED) {
            self.seed = Some(parse_env(ENV_SEED, &seed)?);
        }
        if let Some(confidence) = lookup(ENV_CONFIDENCE) {
            self.confidence = parse_env(ENV_CONFIDENCE, &confidence)?;
        }
        if let Some(parallel) = lookup(ENV_PARALLEL) {
            self.parallel = parse_flag(ENV_PARALLEL, &parallel)?;
        }
        if let Some(batch_size) = lookup(ENV_BATCH_SIZE) {
            self.batch_size = parse_env(ENV_BATCH_SIZE, &batch_size)?;
        }
        if let Some(log_level) = lookup(ENV_LOG_LEVEL) {
            self.log_level = LogLevel::from_str(&log_level)?;
        }
        if let Some(format) = lookup(ENV_FORMAT) {
            self.format = OutputFormat::from_str(&format)?;
        }
        Ok(())
    }

    /// Merge with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli: &CliOverrides) {
        if let Some(ticker) = &cli.ticker {
            self.ticker = ticker.clone();
        }
        if let Some(period) = cli.period {
            self.period = period;
        }
        if cli.window.is_some() {
            self.window = cli.window;
        }
        if let Some(days) = cli.horizon_days {
            self.horizon_days = days;
        }
        if let Some(paths) = cli.n_paths {
            self.n_paths = paths;
        }
        if cli.seed.is_some() {
            self.seed = cli.seed;
        }
        if let Some(confidence) = cli.confidence {
            self.confidence = confidence;
        }
        if cli.parallel {
            self.parallel = true;
        }
        if let Some(batch_size) = cli.batch_size {
            self.batch_size = batch_size;
        }
        if let Some(log_level) = cli.log_level {
            self.log_level = log_level;
        }
        if let Some(format) = cli.format {
            self.format = format;
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.limits.validate()?;

        if self.ticker.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                name: "ticker",
                reason: "must not be empty".to_string(),
            });
        }

        let limits = &self.limits;
        if !(limits.min_horizon_days..=limits.max_horizon_days).contains(&self.horizon_days) {
            return Err(ConfigError::OutOfRange {
                name: "horizon_days",
                value: self.horizon_days,
                min: limits.min_horizon_days,
                max: limits.max_horizon_days,
            });
        }
        if !(limits.min_paths..=limits.max_paths).contains(&self.n_paths) {
            return Err(ConfigError::OutOfRange {
                name: "n_paths",
                value: self.n_paths,
                min: limits.min_paths,
                max: limits.max_paths,
            });
        }

        if !(self.confidence > 0.0 && self.confidence < 1.0) {
            return Err(ConfigError::InvalidValue {
                name: "confidence",
                reason: format!("must be in (0, 1), got {}", self.confidence),
            });
        }
        if self.batch_size == 0 {
            return Err(ConfigError::InvalidValue {
                name: "batch_size",
                reason: "must be at least 1".to_string(),
            });
        }
        if let Some(window) = self.window {
            if window < 2 {
                return Err(ConfigError::InvalidValue {
                    name: "window",
                    reason: format!("needs at least 2 observations, got {}", window),
                });
            }
        }

        Ok(())
    }
}

/// Values supplied on the command line
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    /// Config file path
    pub config_file: Option<PathBuf>,
    /// Ticker override
    pub ticker: Option<String>,
    /// Lookback period override
    pub period: Option<LookbackPeriod>,
    /// Trailing window override
    pub window: Option<usize>,
    /// Horizon override
    pub horizon_days: Option<usize>,
    /// Path count override
    pub n_paths: Option<usize>,
    /// Seed override
    pub seed: Option<u64>,
    /// Confidence level override
    pub confidence: Option<f64>,
    /// Enable parallel generation
    pub parallel: bool,
    /// Batch size override
    pub batch_size: Option<usize>,
    /// Log level override
    pub log_level: Option<LogLevel>,
    /// Output format override
    pub format: Option<OutputFormat>,
}

/// Build configuration from all sources
///
/// Priority (highest to lowest):
/// 1. CLI arguments
/// 2. Environment variables
/// 3. Config file
/// 4. Default values
pub fn build_config(cli: &CliOverrides) -> Result<CliConfig, ConfigError> {
    build_config_with_env(cli, |key| std::env::var(key).ok())
}

/// [`build_config`] with an explicit environment lookup
pub fn build_config_with_env<F>(cli: &CliOverrides, lookup: F) -> Result<CliConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match &cli.config_file {
        Some(path) => CliConfig::from_file(path)?,
        None => CliConfig::default(),
    };

    config.apply_env_overrides_from(lookup)?;
    config.merge_with_cli(cli);
    config.validate()?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = CliConfig::default();
        assert_eq!(config.ticker, "AAPL");
        assert_eq!(config.period, LookbackPeriod::OneYear);
        assert_eq!(config.window, None);
        assert_eq!(config.horizon_days, 180);
        assert_eq!(config.n_paths, 500);
        assert_eq!(config.confidence, 0.95);
        assert_eq!(config.seed, None);
        assert!(!config.parallel);
        assert_eq!(config.log_level, LogLevel::Info);
        assert_eq!(config.format, OutputFormat::Table);
        assert_eq!(config.limits, SimulationLimits::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(LogLevel::from_str("trace").unwrap(), LogLevel::Trace);
        assert_eq!(LogLevel::from_str("DEBUG").unwrap(), LogLevel::Debug);
        assert_eq!(LogLevel::from_str("Info").unwrap(), LogLevel::Info);
        assert_eq!(LogLevel::from_str("WARN").unwrap(), LogLevel::Warn);
        assert_eq!(LogLevel::from_str("error").unwrap(), LogLevel::Error);
        assert_eq!(LogLevel::Warn.to_string(), "warn");

        assert!(LogLevel::from_str("verbose").is_err());
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!(OutputFormat::from_str("json").unwrap(), OutputFormat::Json);
        assert_eq!(OutputFormat::from_str("Table").unwrap(), OutputFormat::Table);
        assert_eq!(OutputFormat::Json.to_string(), "json");
        assert_eq!(
            OutputFormat::from_str("csv"),
            Err(ConfigError::InvalidFormat("csv".to_string()))
        );
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
ticker = "MSFT"
period = "6mo"
horizon_days = 90
n_paths = 250
seed = 7
log_level = "DEBUG"
format = "json"

[limits]
max_paths = 2000
"#
        )
        .unwrap();

        let config = CliConfig::from_file(file.path()).unwrap();
        assert_eq!(config.ticker, "MSFT");
        assert_eq!(config.period, LookbackPeriod::SixMonths);
        assert_eq!(config.horizon_days, 90);
        assert_eq!(config.n_paths, 250);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.format, OutputFormat::Json);
        assert_eq!(config.limits.max_paths, 2000);
        assert_eq!(config.limits.min_paths, 100);
        assert_eq!(config.confidence, 0.95);
    }

    #[test]
    fn test_from_file_errors() {
        let missing = CliConfig::from_file(Path::new("/nonexistent/forecast.toml"));
        assert!(matches!(missing, Err(ConfigError::FileError(_))));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "period = \"5y\"").unwrap();
        assert!(matches!(
            CliConfig::from_file(file.path()),
            Err(ConfigError::FileError(_))
        ));
    }

    #[test]
    fn test_env_overrides() {
        let mut config = CliConfig::default();
        config
            .apply_env_overrides_from(env(&[
                ("FORECAST_TICKER", "NVDA"),
                ("FORECAST_PERIOD", "3mo"),
                ("FORECAST_DAYS", "60"),
                ("FORECAST_PATHS", "1000"),
                ("FORECAST_SEED", "42"),
                ("FORECAST_CONFIDENCE", "0.9"),
                ("FORECAST_PARALLEL", "true"),
                ("FORECAST_LOG_LEVEL", "warn"),
                ("FORECAST_FORMAT", "json"),
            ]))
            .unwrap();

        assert_eq!(config.ticker, "NVDA");
        assert_eq!(config.period, LookbackPeriod::ThreeMonths);
        assert_eq!(config.horizon_days, 60);
        assert_eq!(config.n_paths, 1000);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.confidence, 0.9);
        assert!(config.parallel);
        assert_eq!(config.log_level, LogLevel::Warn);
        assert_eq!(config.format, OutputFormat::Json);
    }

    #[test]
    fn test_env_invalid_values() {
        let mut config = CliConfig::default();
        assert!(matches!(
            config.apply_env_overrides_from(env(&[("FORECAST_DAYS", "soon")])),
            Err(ConfigError::EnvError(_))
        ));
        assert!(matches!(
            config.apply_env_overrides_from(env(&[("FORECAST_PERIOD", "10y")])),
            Err(ConfigError::EnvError(_))
        ));
        assert!(matches!(
            config.apply_env_overrides_from(env(&[("FORECAST_LOG_LEVEL", "loud")])),
            Err(ConfigError::InvalidLogLevel(_))
        ));
    }

    #[test]
    fn test_env_parallel_flag() {
        for (value, expected) in [("TRUE", true), ("1", true), (" false ", false), ("0", false)] {
            let mut config = CliConfig {
                parallel: !expected,
                ..Default::default()
            };
            config
                .apply_env_overrides_from(env(&[("FORECAST_PARALLEL", value)]))
                .unwrap();
            assert_eq!(config.parallel, expected, "FORECAST_PARALLEL={:?}", value);
        }

        for value in ["yes", "on", ""] {
            let mut config = CliConfig {
                parallel: true,
                ..Default::default()
            };
            assert!(matches!(
                config.apply_env_overrides_from(env(&[("FORECAST_PARALLEL", value)])),
                Err(ConfigError::EnvError(_))
            ));
            assert!(config.parallel);
        }
    }

    #[test]
    fn test_priority_order() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "horizon_days = 90\nn_paths = 200\nticker = \"IBM\"").unwrap();

        let cli = CliOverrides {
            config_file: Some(file.path().to_path_buf()),
            n_paths: Some(800),
            ..Default::default()
        };
        let config = build_config_with_env(
            &cli,
            env(&[("FORECAST_PATHS", "300"), ("FORECAST_TICKER", "ORCL")]),
        )
        .unwrap();

        assert_eq!(config.horizon_days, 90);
        assert_eq!(config.ticker, "ORCL");
        assert_eq!(config.n_paths, 800);
    }

    #[test]
    fn test_validate_limits() {
        let config = CliConfig {
            horizon_days: 29,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::OutOfRange {
                name: "horizon_days",
                value: 29,
                min: 30,
                max: 365
            })
        );

        let config = CliConfig {
            n_paths: 1001,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::OutOfRange { name: "n_paths", .. })
        ));

        let config = CliConfig {
            horizon_days: 365,
            n_paths: 100,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_other_fields() {
        for config in [
            CliConfig {
                confidence: 1.0,
                ..Default::default()
            },
            CliConfig {
                batch_size: 0,
                ..Default::default()
            },
            CliConfig {
                window: Some(1),
                ..Default::default()
            },
            CliConfig {
                ticker: "  ".to_string(),
                ..Default::default()
            },
            CliConfig {
                limits: SimulationLimits {
                    min_paths: 500,
                    max_paths: 100,
                    ..Default::default()
                },
                ..Default::default()
            },
        ] {
            assert!(matches!(
                config.validate(),
                Err(ConfigError::InvalidValue { .. })
            ));
        }
    }
}
