use chrono::Utc;
use std::sync::Arc;
use tracing::debug;

use super::types::{Interval, TimeSeriesPoint};
use super::SeriesProvider;
use crate::errors::Result;
use crate::utils::Validator;

/// Fetches one symbol's closing-price series over a named interval.
pub struct HistoryFetcher {
    provider: Arc<dyn SeriesProvider>,
}

impl HistoryFetcher {
    pub fn new(provider: Arc<dyn SeriesProvider>) -> Self {
        Self { provider }
    }

    /// Fetch the ascending series covering `interval`, ending at today
    /// (or the last weekday for the shortest interval).
    pub async fn fetch_series(
        &self,
        symbol: &str,
        interval: Interval,
    ) -> Result<Vec<TimeSeriesPoint>> {
        Validator::validate_symbol(symbol)?;

        let (from, to) = interval.date_range(Utc::now());
        debug!("fetching {} series for {} ({} to {})", interval, symbol, from, to);

        self.provider.series(symbol, from, to).await
    }
}
