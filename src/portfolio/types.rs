use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Combined holdings-value curve and its derived figures.
///
/// Derived fresh on every load, never stored. `series[i]` is the sum of
/// every surviving symbol's closing price at position `i`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PortfolioReport {
    pub series: Vec<f64>,
    /// Last combined value, 0 when the curve is empty.
    pub total: f64,
    /// Last minus first combined value.
    pub profit: f64,
    pub min: f64,
    pub max: f64,
    /// Number of series that survived fetching and contributed to the curve.
    pub contributing: usize,
}

impl PortfolioReport {
    /// Derive total/profit/min/max from a combined curve.
    pub fn from_combined(series: Vec<f64>, contributing: usize) -> Self {
        if series.is_empty() {
            return Self {
                contributing,
                ..Self::default()
            };
        }

        let first = series[0];
        let last = series[series.len() - 1];
        let min = series.iter().copied().fold(f64::INFINITY, f64::min);
        let max = series.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        Self {
            series,
            total: last,
            profit: last - first,
            min,
            max,
            contributing,
        }
    }
}

/// One point of a date-aligned combined curve.
///
/// `missing` lists the symbols that had no close on that date; their
/// contribution to `value` is zero and explicitly visible to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatedPoint {
    pub date: NaiveDate,
    pub value: f64,
    pub missing: Vec<String>,
}
