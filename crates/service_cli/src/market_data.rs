//! Historical price loading
//!
//! Reads daily closes from CSV files such as those exported by common market
//! data providers:
//!
//! ```text
//! Date,Open,High,Low,Close,Adj Close,Volume
//! 2024-01-02,187.15,188.44,183.89,185.64,184.94,82488700
//! ```
//!
//! Header names are matched case-insensitively. The `close` column is used
//! when present, otherwise `adj close`. The `date` column is optional; only
//! its first ten characters (`YYYY-MM-DD`) are read so timestamped exports
//! load as well.

use chrono::NaiveDate;
use forecast_core::types::{HistoricalSeries, LookbackPeriod};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, warn};

use crate::{CliError, Result};

const DATE_FORMAT: &str = "%Y-%m-%d";
const CLOSE_COLUMNS: [&str; 4] = ["close", "adj close", "adj_close", "adjclose"];

fn find_column(headers: &csv::StringRecord, names: &[&str]) -> Option<usize> {
    names.iter().find_map(|name| {
        headers
            .iter()
            .position(|header| header.trim().eq_ignore_ascii_case(name))
    })
}

fn parse_date(field: &str, line: usize) -> Result<NaiveDate> {
    let field = field.trim();
    let day = field.get(..10).unwrap_or(field);
    NaiveDate::parse_from_str(day, DATE_FORMAT)
        .map_err(|e| CliError::parse(line, format!("invalid date {:?}: {}", field, e)))
}

fn parse_close(field: &str, line: usize) -> Result<f64> {
    field
        .trim()
        .parse::<f64>()
        .map_err(|_| CliError::parse(line, format!("invalid close {:?}", field)))
}

/// Read a price series from CSV data
pub fn read_series<R: Read>(reader: R) -> Result<HistoricalSeries> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let close_idx = find_column(&headers, &CLOSE_COLUMNS)
        .ok_or_else(|| CliError::parse(1, "missing close column"))?;
    let date_idx = find_column(&headers, &["date", "datetime", "timestamp"]);

    let mut closes = Vec::new();
    let mut dates = Vec::new();

    for (idx, record) in csv_reader.records().enumerate() {
        let record = record?;
        // Header is line 1
        let line = idx + 2;

        let close = record
            .get(close_idx)
            .ok_or_else(|| CliError::parse(line, "missing close value"))?;
        closes.push(parse_close(close, line)?);

        if let Some(date_idx) = date_idx {
            let date = record
                .get(date_idx)
                .ok_or_else(|| CliError::parse(line, "missing date value"))?;
            dates.push(parse_date(date, line)?);
        }
    }

    debug!(observations = closes.len(), dated = date_idx.is_some(), "Read price history");

    if date_idx.is_some() {
        Ok(HistoricalSeries::with_dates(dates, closes)?)
    } else {
        Ok(HistoricalSeries::from_closes(closes))
    }
}

/// Load a price series from a CSV file
pub fn load_series(path: &Path) -> Result<HistoricalSeries> {
    if !path.exists() {
        return Err(CliError::FileNotFound(path.display().to_string()));
    }
    read_series(File::open(path)?)
}

/// Restrict a series to the calibration window
///
/// Dated series are cut to `period`; an optional `window` then keeps only
/// the trailing observations.
pub fn select_window(
    series: &HistoricalSeries,
    period: LookbackPeriod,
    window: Option<usize>,
) -> Result<HistoricalSeries> {
    let mut selected = if series.dates().is_some() {
        series.lookback(period)?
    } else {
        warn!("Price history has no dates; lookback period {} ignored", period);
        series.clone()
    };

    if let Some(window) = window {
        selected = selected.trailing(window);
    }

    debug!(
        observations = selected.len(),
        period = %period,
        window = ?window,
        "Selected calibration window"
    );
    Ok(selected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use forecast_core::types::ForecastError;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_read_provider_export() {
        let data = "\
Date,Open,High,Low,Close,Adj Close,Volume
2024-01-02,187.15,188.44,183.89,185.64,184.94,82488700
2024-01-03,184.22,185.88,183.43,184.25,183.55,58414500
2024-01-04,182.15,183.09,180.88,181.91,181.22,71983600
";
        let series = read_series(data.as_bytes()).unwrap();

        assert_eq!(series.closes(), &[185.64, 184.25, 181.91]);
        assert_eq!(
            series.dates().unwrap(),
            &[date(2024, 1, 2), date(2024, 1, 3), date(2024, 1, 4)]
        );
    }

    #[test]
    fn test_adj_close_fallback_and_timestamps() {
        let data = "\
date,adj close
2024-03-01 00:00:00-05:00, 100.5
2024-03-04 00:00:00-05:00, 101.25
";
        let series = read_series(data.as_bytes()).unwrap();
        assert_eq!(series.closes(), &[100.5, 101.25]);
        assert_eq!(series.last_date(), Some(date(2024, 3, 4)));
    }

    #[test]
    fn test_undated_series() {
        let series = read_series("CLOSE\n10\n11\n12\n".as_bytes()).unwrap();
        assert_eq!(series.closes(), &[10.0, 11.0, 12.0]);
        assert!(series.dates().is_none());
    }

    #[test]
    fn test_missing_close_column() {
        let err = read_series("date,open\n2024-01-02,1.0\n".as_bytes()).unwrap_err();
        assert!(matches!(err, CliError::Parse { line: 1, .. }));
    }

    #[test]
    fn test_bad_values_report_line() {
        let err = read_series("date,close\n2024-01-02,1.0\n2024-01-03,n/a\n".as_bytes())
            .unwrap_err();
        assert!(matches!(err, CliError::Parse { line: 3, .. }));

        let err = read_series("date,close\n01/02/2024,1.0\n".as_bytes()).unwrap_err();
        assert!(matches!(err, CliError::Parse { line: 2, .. }));
    }

    #[test]
    fn test_unordered_dates_rejected() {
        let err = read_series("date,close\n2024-01-03,1.0\n2024-01-02,2.0\n".as_bytes())
            .unwrap_err();
        assert!(matches!(
            err,
            CliError::Forecast(ForecastError::InvalidSeries(_))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_series(Path::new("/nonexistent/prices.csv")).unwrap_err();
        assert!(matches!(err, CliError::FileNotFound(_)));
    }

    #[test]
    fn test_select_window() {
        let dates: Vec<NaiveDate> = (1..=12).map(|m| date(2024, m, 15)).collect();
        let closes: Vec<f64> = (1..=12).map(|m| 100.0 + m as f64).collect();
        let series = HistoricalSeries::with_dates(dates, closes).unwrap();

        let three_months = select_window(&series, LookbackPeriod::ThreeMonths, None).unwrap();
        assert_eq!(three_months.closes(), &[109.0, 110.0, 111.0, 112.0]);

        let trailing = select_window(&series, LookbackPeriod::OneYear, Some(2)).unwrap();
        assert_eq!(trailing.closes(), &[111.0, 112.0]);

        let undated = HistoricalSeries::from_closes(vec![1.0, 2.0, 3.0]);
        let selected = select_window(&undated, LookbackPeriod::OneMonth, None).unwrap();
        assert_eq!(selected.len(), 3);
    }
}
