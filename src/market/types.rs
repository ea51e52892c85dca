use chrono::{DateTime, Datelike, Days, NaiveDate, Utc, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::AppError;

/// Latest price and percent change for one ticker symbol.
///
/// Ephemeral: fetched on demand, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub symbol: String,
    pub price: f64,
    pub change_percent: f64,
}

/// One closing price in a historical series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesPoint {
    pub timestamp: DateTime<Utc>,
    pub price: f64,
}

impl TimeSeriesPoint {
    pub fn new(timestamp: DateTime<Utc>, price: f64) -> Self {
        Self { timestamp, price }
    }
}

/// Fundamental metrics from the key-statistics endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KeyStats {
    pub symbol: String,
    pub week52_high: Option<f64>,
    pub week52_low: Option<f64>,
    /// Reported by the provider in millions of USD.
    pub market_cap: Option<f64>,
    pub pe_ratio: Option<f64>,
}

/// One news article (market-wide or company-specific).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub headline: String,
    pub source: String,
    pub image_url: Option<String>,
    pub article_url: String,
    pub published_at: DateTime<Utc>,
}

/// Fixed set of lookback windows for historical series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Interval {
    Day,
    Week,
    Month,
    Quarter,
    Year,
}

impl Interval {
    pub const ALL: [Interval; 5] = [
        Interval::Day,
        Interval::Week,
        Interval::Month,
        Interval::Quarter,
        Interval::Year,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Interval::Day => "1D",
            Interval::Week => "1W",
            Interval::Month => "1M",
            Interval::Quarter => "3M",
            Interval::Year => "1Y",
        }
    }

    fn offset_days(&self) -> u64 {
        match self {
            Interval::Day => 1,
            Interval::Week => 7,
            Interval::Month => 30,
            Interval::Quarter => 90,
            Interval::Year => 365,
        }
    }

    /// Compute the `(from, to)` date range this interval covers, relative
    /// to `now`.
    ///
    /// `Day` is the only window short enough for weekends to matter: its
    /// range end slides back to the previous Friday so a Saturday/Sunday
    /// request still covers a trading day.
    pub fn date_range(&self, now: DateTime<Utc>) -> (NaiveDate, NaiveDate) {
        let mut to = now.date_naive();

        if *self == Interval::Day {
            while matches!(to.weekday(), Weekday::Sat | Weekday::Sun) {
                match to.pred_opt() {
                    Some(prev) => to = prev,
                    None => break,
                }
            }
        }

        let from = to
            .checked_sub_days(Days::new(self.offset_days()))
            .unwrap_or(to);

        (from, to)
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Interval {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // No single-letter aliases: "M", "D", "W" and friends are real
        // ticker symbols, and callers mix intervals and symbols on one
        // command line.
        match s.to_uppercase().as_str() {
            "1D" | "DAY" => Ok(Interval::Day),
            "1W" | "WEEK" => Ok(Interval::Week),
            "1M" | "MONTH" => Ok(Interval::Month),
            "3M" | "QUARTER" => Ok(Interval::Quarter),
            "1Y" | "YEAR" => Ok(Interval::Year),
            other => Err(AppError::validation(format!(
                "unknown interval '{}' (expected one of 1D, 1W, 1M, 3M, 1Y)",
                other
            ))),
        }
    }
}
