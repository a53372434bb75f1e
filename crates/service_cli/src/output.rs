//! Rendering of estimation and forecast results
//!
//! Results are written to any [`Write`] sink as a box-drawn table or as
//! pretty-printed JSON.

use chrono::NaiveDate;
use forecast_core::estimation::ReturnStatistics;
use forecast_core::types::LookbackPeriod;
use forecast_engine::mc::{ForecastResult, PathEnsemble};
use serde::Serialize;
use std::io::Write;

use crate::config::OutputFormat;
use crate::Result;

/// Forecast produced by the `simulate` command
#[derive(Debug, Serialize)]
pub struct SimulationReport<'a> {
    /// Ticker symbol
    pub ticker: &'a str,
    /// Calibration lookback period
    pub period: LookbackPeriod,
    /// Observations used for calibration
    pub observations: usize,
    /// Last observed close
    pub start_price: f64,
    /// Steps per path
    pub horizon_days: usize,
    /// Seed of the run
    pub seed: u64,
    /// Estimated return statistics
    pub stats: ReturnStatistics,
    /// Terminal-price summary
    pub forecast: ForecastResult,
    /// Simulated paths, when requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paths: Option<Vec<&'a [f64]>>,
}

impl<'a> SimulationReport<'a> {
    /// Attach the ensemble's paths to the report
    pub fn with_paths(mut self, ensemble: &'a PathEnsemble) -> Self {
        self.paths = Some(ensemble.paths().collect());
        self
    }
}

/// Calibration produced by the `estimate` command
#[derive(Debug, Serialize)]
pub struct EstimateReport<'a> {
    /// Ticker symbol
    pub ticker: &'a str,
    /// Calibration lookback period
    pub period: LookbackPeriod,
    /// Observations used for calibration
    pub observations: usize,
    /// First date of the window, for dated series
    pub first_date: Option<NaiveDate>,
    /// Last date of the window, for dated series
    pub last_date: Option<NaiveDate>,
    /// Estimated return statistics
    pub stats: ReturnStatistics,
}

fn write_table<W: Write>(out: &mut W, rows: &[(&str, String)]) -> std::io::Result<()> {
    let key_width = rows.iter().map(|(k, _)| k.chars().count()).max().unwrap_or(0);
    let value_width = rows
        .iter()
        .map(|(_, v)| v.chars().count())
        .max()
        .unwrap_or(0);
    let key_rule = "─".repeat(key_width + 2);
    let value_rule = "─".repeat(value_width + 2);

    writeln!(out, "┌{}┬{}┐", key_rule, value_rule)?;
    for (key, value) in rows {
        writeln!(
            out,
            "│ {:<kw$} │ {:>vw$} │",
            key,
            value,
            kw = key_width,
            vw = value_width
        )?;
    }
    writeln!(out, "└{}┴{}┘", key_rule, value_rule)
}

fn write_json<W: Write, T: Serialize>(out: &mut W, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

fn stats_rows(stats: &ReturnStatistics) -> [(&'static str, String); 3] {
    [
        ("Daily drift", format!("{:.6}", stats.mean())),
        ("Daily volatility", format!("{:.6}", stats.std_dev())),
        ("Returns", stats.sample_size().to_string()),
    ]
}

/// Write a simulation report
///
/// In table mode, requested paths follow the table as one comma-separated
/// line per path.
pub fn write_simulation<W: Write>(
    out: &mut W,
    report: &SimulationReport<'_>,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Json => write_json(out, report),
        OutputFormat::Table => {
            let forecast = &report.forecast;
            let mut rows = vec![
                ("Ticker", report.ticker.to_string()),
                ("Period", report.period.to_string()),
                ("Observations", report.observations.to_string()),
                ("Start price", format!("{:.2}", report.start_price)),
            ];
            rows.extend(stats_rows(&report.stats));
            rows.extend([
                ("Horizon (days)", report.horizon_days.to_string()),
                ("Paths", forecast.n_paths.to_string()),
                ("Seed", report.seed.to_string()),
                (
                    "Expected price",
                    format!("{:.2}", forecast.expected_terminal_price),
                ),
                (
                    "Confidence",
                    format!("{:.1}%", forecast.confidence_level * 100.0),
                ),
                ("Lower bound", format!("{:.2}", forecast.lower_bound)),
                ("Upper bound", format!("{:.2}", forecast.upper_bound)),
            ]);
            write_table(out, &rows)?;

            if let Some(paths) = &report.paths {
                for path in paths {
                    let line: Vec<String> = path.iter().map(|p| format!("{:.4}", p)).collect();
                    writeln!(out, "{}", line.join(","))?;
                }
            }
            Ok(())
        }
    }
}

/// Write an estimation report
pub fn write_estimate<W: Write>(
    out: &mut W,
    report: &EstimateReport<'_>,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Json => write_json(out, report),
        OutputFormat::Table => {
            let mut rows = vec![
                ("Ticker", report.ticker.to_string()),
                ("Period", report.period.to_string()),
                ("Observations", report.observations.to_string()),
            ];
            if let (Some(first), Some(last)) = (report.first_date, report.last_date) {
                rows.push(("Window", format!("{} to {}", first, last)));
            }
            rows.extend(stats_rows(&report.stats));
            write_table(out, &rows)?;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report() -> SimulationReport<'static> {
        SimulationReport {
            ticker: "AAPL",
            period: LookbackPeriod::OneYear,
            observations: 252,
            start_price: 185.64,
            horizon_days: 180,
            seed: 42,
            stats: ReturnStatistics::new(0.0008, 0.017),
            forecast: ForecastResult {
                expected_terminal_price: 212.3,
                lower_bound: 150.1,
                upper_bound: 290.7,
                confidence_level: 0.95,
                n_paths: 500,
            },
            paths: None,
        }
    }

    #[test]
    fn test_table_output() {
        let mut buf = Vec::new();
        write_simulation(&mut buf, &report(), OutputFormat::Table).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert!(text.starts_with('┌'));
        assert!(text.contains("Expected price"));
        assert!(text.contains("212.30"));
        assert!(text.contains("95.0%"));
        assert!(text.trim_end().ends_with('┘'));
    }

    #[test]
    fn test_json_output() {
        let mut buf = Vec::new();
        write_simulation(&mut buf, &report(), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();

        assert_eq!(value["ticker"], "AAPL");
        assert_eq!(value["period"], "1y");
        assert_eq!(value["forecast"]["n_paths"], 500);
        assert_eq!(value["forecast"]["lower_bound"], 150.1);
        assert_eq!(value["stats"]["std_dev"], 0.017);
        assert!(value.get("paths").is_none());
    }

    #[test]
    fn test_paths_emitted() {
        let ensemble =
            PathEnsemble::from_vec(vec![100.0, 101.0, 102.0, 100.0, 99.0, 98.0], 2, 3).unwrap();
        let report = report().with_paths(&ensemble);

        let mut buf = Vec::new();
        write_simulation(&mut buf, &report, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value["paths"][1][2], 98.0);

        let mut buf = Vec::new();
        write_simulation(&mut buf, &report, OutputFormat::Table).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("100.0000,101.0000,102.0000"));
        assert!(text.contains("100.0000,99.0000,98.0000"));
    }

    #[test]
    fn test_estimate_output() {
        let report = EstimateReport {
            ticker: "MSFT",
            period: LookbackPeriod::SixMonths,
            observations: 126,
            first_date: NaiveDate::from_ymd_opt(2024, 1, 2),
            last_date: NaiveDate::from_ymd_opt(2024, 6, 28),
            stats: ReturnStatistics::new(0.001, 0.02),
        };

        let mut buf = Vec::new();
        write_estimate(&mut buf, &report, OutputFormat::Table).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("2024-01-02 to 2024-06-28"));
        assert!(text.contains("0.020000"));

        let mut buf = Vec::new();
        write_estimate(&mut buf, &report, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value["period"], "6mo");
        assert_eq!(value["first_date"], "2024-01-02");
    }
}
