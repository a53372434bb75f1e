//! Calendar lookback periods for selecting calibration history.
//!
//! Periods use the market-data notation `1mo`, `3mo`, `6mo`, `1y` and `2y`.

use std::fmt;
use std::str::FromStr;

use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};

use super::error::ForecastError;

/// Calendar window of history counted back from the last observation.
///
/// # Examples
/// ```
/// use forecast_core::types::LookbackPeriod;
/// use chrono::NaiveDate;
///
/// let period: LookbackPeriod = "6mo".parse().unwrap();
/// let end = NaiveDate::from_ymd_opt(2024, 8, 31).unwrap();
///
/// assert_eq!(period.months(), 6);
/// assert_eq!(period.start_from(end), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
/// assert_eq!(period.to_string(), "6mo");
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum LookbackPeriod {
    /// One calendar month.
    OneMonth,
    /// Three calendar months.
    ThreeMonths,
    /// Six calendar months.
    SixMonths,
    /// One calendar year.
    #[default]
    OneYear,
    /// Two calendar years.
    TwoYears,
}

impl LookbackPeriod {
    /// All supported periods, shortest first.
    pub const ALL: [LookbackPeriod; 5] = [
        LookbackPeriod::OneMonth,
        LookbackPeriod::ThreeMonths,
        LookbackPeriod::SixMonths,
        LookbackPeriod::OneYear,
        LookbackPeriod::TwoYears,
    ];

    /// Length of the period in calendar months.
    #[inline]
    pub fn months(&self) -> u32 {
        match self {
            LookbackPeriod::OneMonth => 1,
            LookbackPeriod::ThreeMonths => 3,
            LookbackPeriod::SixMonths => 6,
            LookbackPeriod::OneYear => 12,
            LookbackPeriod::TwoYears => 24,
        }
    }

    /// Short notation, e.g. `"3mo"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            LookbackPeriod::OneMonth => "1mo",
            LookbackPeriod::ThreeMonths => "3mo",
            LookbackPeriod::SixMonths => "6mo",
            LookbackPeriod::OneYear => "1y",
            LookbackPeriod::TwoYears => "2y",
        }
    }

    /// First calendar date inside the window ending at `end`.
    ///
    /// Month arithmetic clamps to the last valid day, so 31 August minus
    /// six months is 29 February in a leap year.
    pub fn start_from(&self, end: NaiveDate) -> NaiveDate {
        end.checked_sub_months(Months::new(self.months()))
            .unwrap_or(NaiveDate::MIN)
    }
}

impl FromStr for LookbackPeriod {
    type Err = ForecastError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "1mo" => Ok(LookbackPeriod::OneMonth),
            "3mo" => Ok(LookbackPeriod::ThreeMonths),
            "6mo" => Ok(LookbackPeriod::SixMonths),
            "1y" | "12mo" => Ok(LookbackPeriod::OneYear),
            "2y" | "24mo" => Ok(LookbackPeriod::TwoYears),
            other => Err(ForecastError::invalid_config(
                "period",
                format!("unknown lookback period '{}'; expected one of 1mo, 3mo, 6mo, 1y, 2y", other),
            )),
        }
    }
}

impl TryFrom<String> for LookbackPeriod {
    type Error = ForecastError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<LookbackPeriod> for String {
    fn from(period: LookbackPeriod) -> Self {
        period.as_str().to_string()
    }
}

impl fmt::Display for LookbackPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_all_notations() {
        for period in LookbackPeriod::ALL {
            assert_eq!(period.as_str().parse::<LookbackPeriod>().unwrap(), period);
        }
        assert_eq!("1Y".parse::<LookbackPeriod>().unwrap(), LookbackPeriod::OneYear);
        assert_eq!(" 3mo ".parse::<LookbackPeriod>().unwrap(), LookbackPeriod::ThreeMonths);
    }

    #[test]
    fn test_parse_unknown_period() {
        let err = "5d".parse::<LookbackPeriod>().unwrap_err();
        assert!(matches!(err, ForecastError::InvalidConfig { name: "period", .. }));
    }

    #[test]
    fn test_default_is_one_year() {
        assert_eq!(LookbackPeriod::default(), LookbackPeriod::OneYear);
    }

    #[test]
    fn test_start_from() {
        let end = date(2024, 6, 28);
        assert_eq!(LookbackPeriod::OneMonth.start_from(end), date(2024, 5, 28));
        assert_eq!(LookbackPeriod::OneYear.start_from(end), date(2023, 6, 28));
        assert_eq!(LookbackPeriod::TwoYears.start_from(end), date(2022, 6, 28));
    }

    #[test]
    fn test_start_from_clamps_month_end() {
        assert_eq!(
            LookbackPeriod::OneMonth.start_from(date(2024, 3, 31)),
            date(2024, 2, 29)
        );
    }

    #[test]
    fn test_display_round_trips_through_string() {
        let s: String = LookbackPeriod::SixMonths.into();
        assert_eq!(s, "6mo");
        assert_eq!(format!("{}", LookbackPeriod::TwoYears), "2y");
    }
}
