use futures::future::join_all;
use indexmap::IndexMap;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{info, warn};

use super::types::{DatedPoint, PortfolioReport};
use crate::errors::Result;
use crate::market::types::{Interval, Quote, TimeSeriesPoint};
use crate::market::{HistoryFetcher, QuoteFetcher, QuoteProvider, SeriesProvider};

/// Point-wise sum of several series, truncated to the shortest length.
///
/// Position `i` of every series is assumed to be the same trading day;
/// longer series lose their trailing points. Returns an empty curve when
/// `series` is empty or any input series is empty.
pub fn combine_truncated(series: &[Vec<TimeSeriesPoint>]) -> Vec<f64> {
    let len = match series.iter().map(Vec::len).min() {
        Some(len) => len,
        None => return Vec::new(),
    };

    (0..len)
        .map(|i| series.iter().map(|s| s[i].price).sum())
        .collect()
}

/// Date-keyed alternative to [`combine_truncated`].
///
/// Series are joined on calendar date instead of position, so misaligned
/// start dates and market holidays no longer shift sums against each other.
/// Dates where some symbol has no close are kept, with the absentees listed
/// on the point.
pub fn combine_by_date(series: &[(String, Vec<TimeSeriesPoint>)]) -> Vec<DatedPoint> {
    let mut by_date: BTreeMap<chrono::NaiveDate, (f64, Vec<String>)> = BTreeMap::new();

    for (_, points) in series {
        for point in points {
            by_date.entry(point.timestamp.date_naive()).or_default();
        }
    }

    for (symbol, points) in series {
        let mut have: BTreeMap<chrono::NaiveDate, f64> = BTreeMap::new();
        for point in points {
            have.insert(point.timestamp.date_naive(), point.price);
        }

        for (date, (value, missing)) in by_date.iter_mut() {
            match have.get(date) {
                Some(price) => *value += price,
                None => missing.push(symbol.clone()),
            }
        }
    }

    by_date
        .into_iter()
        .map(|(date, (value, missing))| DatedPoint {
            date,
            value,
            missing,
        })
        .collect()
}

/// Everything the portfolio view needs: the combined curve with derived
/// figures, plus per-symbol latest quotes.
#[derive(Debug, Default)]
pub struct PortfolioOverview {
    pub report: PortfolioReport,
    pub quotes: IndexMap<String, Result<Quote>>,
}

/// Loads and aggregates the portfolio for a set of favorite symbols.
pub struct PortfolioService {
    history: HistoryFetcher,
    quotes: QuoteFetcher,
}

impl PortfolioService {
    pub fn new(series_provider: Arc<dyn SeriesProvider>, quote_provider: Arc<dyn QuoteProvider>) -> Self {
        Self {
            history: HistoryFetcher::new(series_provider),
            quotes: QuoteFetcher::new(quote_provider),
        }
    }

    /// Build the combined value curve for `favorites` over `interval`.
    ///
    /// All series are fetched concurrently. A symbol whose fetch fails is
    /// logged and dropped; it never aborts the batch. Zero favorites, or
    /// zero surviving series, yield an empty report with zeroed figures.
    pub async fn load_report(&self, favorites: &[String], interval: Interval) -> PortfolioReport {
        if favorites.is_empty() {
            return PortfolioReport::default();
        }

        let fetches = favorites.iter().map(|symbol| async move {
            let result = self.history.fetch_series(symbol, interval).await;
            (symbol.as_str(), result)
        });

        let mut surviving = Vec::new();
        for (symbol, result) in join_all(fetches).await {
            match result {
                Ok(points) if points.is_empty() => {
                    warn!("series for {} came back empty, skipping", symbol);
                }
                Ok(points) => surviving.push(points),
                Err(e) => {
                    warn!("series fetch for {} failed, skipping: {}", symbol, e);
                }
            }
        }

        if surviving.is_empty() {
            info!("no series survived for {} favorites", favorites.len());
            return PortfolioReport::default();
        }

        let contributing = surviving.len();
        let combined = combine_truncated(&surviving);
        info!(
            "aggregated {} of {} favorites into {} combined points",
            contributing,
            favorites.len(),
            combined.len()
        );

        PortfolioReport::from_combined(combined, contributing)
    }

    /// Load the report and the latest quotes in one concurrent pass.
    ///
    /// Per-symbol failures stay isolated inside both halves; only an
    /// invalid batch (malformed symbol, over the batch cap) fails the
    /// whole call.
    pub async fn load_overview(
        &self,
        favorites: &[String],
        interval: Interval,
    ) -> Result<PortfolioOverview> {
        let (report, quotes) = tokio::join!(
            self.load_report(favorites, interval),
            self.quotes.fetch_quotes(favorites),
        );

        Ok(PortfolioOverview {
            report,
            quotes: quotes?,
        })
    }
}
