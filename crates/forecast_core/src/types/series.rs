//! Historical closing-price series.
//!
//! A [`HistoricalSeries`] is owned by the caller and only read by the
//! estimation and simulation layers. Construction checks the shape of the
//! series (matching dates, increasing dates) but not the prices themselves:
//! price validation belongs to the return estimator, which reports the
//! offending index.

use chrono::NaiveDate;

use super::error::ForecastError;
use super::period::LookbackPeriod;

/// Ordered sequence of observed closing prices, optionally indexed by
/// trading date.
///
/// # Examples
/// ```
/// use forecast_core::types::HistoricalSeries;
/// use chrono::NaiveDate;
///
/// let dates = vec![
///     NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
///     NaiveDate::from_ymd_opt(2024, 1, 3).unwrap(),
///     NaiveDate::from_ymd_opt(2024, 1, 4).unwrap(),
/// ];
/// let series = HistoricalSeries::with_dates(dates, vec![185.6, 184.3, 181.9]).unwrap();
///
/// assert_eq!(series.len(), 3);
/// assert_eq!(series.last_close(), Some(181.9));
/// assert_eq!(series.trailing(2).closes(), &[184.3, 181.9]);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HistoricalSeries {
    closes: Vec<f64>,
    dates: Option<Vec<NaiveDate>>,
}

impl HistoricalSeries {
    /// Creates an undated series from closing prices in chronological order.
    pub fn from_closes(closes: Vec<f64>) -> Self {
        Self {
            closes,
            dates: None,
        }
    }

    /// Creates a dated series.
    ///
    /// # Errors
    ///
    /// Returns [`ForecastError::InvalidSeries`] if the number of dates differs
    /// from the number of prices or the dates are not strictly increasing.
    pub fn with_dates(dates: Vec<NaiveDate>, closes: Vec<f64>) -> Result<Self, ForecastError> {
        if dates.len() != closes.len() {
            return Err(ForecastError::invalid_series(format!(
                "{} dates for {} prices",
                dates.len(),
                closes.len()
            )));
        }
        if let Some(pair) = dates.windows(2).find(|pair| pair[1] <= pair[0]) {
            return Err(ForecastError::invalid_series(format!(
                "dates must be strictly increasing, found {} after {}",
                pair[1], pair[0]
            )));
        }

        Ok(Self {
            closes,
            dates: Some(dates),
        })
    }

    /// Closing prices in chronological order.
    #[inline]
    pub fn closes(&self) -> &[f64] {
        &self.closes
    }

    /// Trading dates, if the series is dated.
    #[inline]
    pub fn dates(&self) -> Option<&[NaiveDate]> {
        self.dates.as_deref()
    }

    /// Number of observations.
    #[inline]
    pub fn len(&self) -> usize {
        self.closes.len()
    }

    /// Returns `true` if the series holds no observations.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.closes.is_empty()
    }

    /// Most recent closing price.
    #[inline]
    pub fn last_close(&self) -> Option<f64> {
        self.closes.last().copied()
    }

    /// Most recent trading date, if the series is dated.
    #[inline]
    pub fn last_date(&self) -> Option<NaiveDate> {
        self.dates.as_ref().and_then(|dates| dates.last().copied())
    }

    /// Returns the last `n` observations (the whole series if shorter).
    pub fn trailing(&self, n: usize) -> Self {
        let start = self.len().saturating_sub(n);
        Self {
            closes: self.closes[start..].to_vec(),
            dates: self.dates.as_ref().map(|dates| dates[start..].to_vec()),
        }
    }

    /// Returns observations dated on or after `start`.
    ///
    /// # Errors
    ///
    /// Returns [`ForecastError::InvalidSeries`] for an undated series.
    pub fn since(&self, start: NaiveDate) -> Result<Self, ForecastError> {
        let dates = self
            .dates
            .as_ref()
            .ok_or_else(|| ForecastError::invalid_series("series has no trading dates"))?;

        let first = dates.partition_point(|date| *date < start);
        Ok(Self {
            closes: self.closes[first..].to_vec(),
            dates: Some(dates[first..].to_vec()),
        })
    }

    /// Returns observations within `period` of the last trading date.
    ///
    /// # Errors
    ///
    /// Returns [`ForecastError::InvalidSeries`] for an undated series.
    pub fn lookback(&self, period: LookbackPeriod) -> Result<Self, ForecastError> {
        match self.last_date() {
            Some(end) => self.since(period.start_from(end)),
            None if self.dates.is_some() => Ok(self.clone()),
            None => Err(ForecastError::invalid_series("series has no trading dates")),
        }
    }
}
