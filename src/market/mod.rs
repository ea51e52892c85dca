pub mod history;
pub mod quotes;
pub mod types;

pub use history::HistoryFetcher;
pub use quotes::QuoteFetcher;
pub use types::{Article, Interval, KeyStats, Quote, TimeSeriesPoint};

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::errors::Result;

/// Source of latest quotes for single symbols.
#[async_trait]
pub trait QuoteProvider: Send + Sync {
    async fn quote(&self, symbol: &str) -> Result<Quote>;
}

/// Source of historical closing-price series.
#[async_trait]
pub trait SeriesProvider: Send + Sync {
    async fn series(
        &self,
        symbol: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<TimeSeriesPoint>>;
}
