use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use reqwest::Client;
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;

use crate::api::key_pool::KeyPool;
use crate::constants::{EOD_API_BASE_URL, EOD_PAGE_LIMIT};
use crate::errors::{AppError, Result};
use crate::market::types::TimeSeriesPoint;
use crate::market::SeriesProvider;
use crate::middleware::TokenBucket;

const PROVIDER: &str = "marketstack";

/// Marketstack client for end-of-day historical closes.
///
/// The free tier allows very few requests per second, so every call takes a
/// token from the shared bucket before touching the network. Authentication
/// is an `access_key` query parameter with the usual rotation policy.
pub struct MarketstackClient {
    client: Client,
    pool: Arc<KeyPool>,
    limiter: Arc<TokenBucket>,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct EodPayload {
    data: Vec<EodRow>,
}

#[derive(Debug, Deserialize)]
struct EodRow {
    date: String,
    close: f64,
}

impl MarketstackClient {
    pub fn new(keys: Vec<String>, limiter: Arc<TokenBucket>) -> Result<Self> {
        Ok(Self {
            client: super::http_client()?,
            pool: Arc::new(KeyPool::new(PROVIDER, keys)?),
            limiter,
            base_url: EOD_API_BASE_URL.to_string(),
        })
    }

    async fn fetch_eod(
        &self,
        symbol: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<TimeSeriesPoint>> {
        self.limiter.acquire().await;

        let url = format!("{}/eod", self.base_url);
        let limit = EOD_PAGE_LIMIT.to_string();
        let date_from = from.to_string();
        let date_to = to.to_string();

        let payload: EodPayload = self
            .pool
            .try_with_rotation("eod", |key| {
                let client = self.client.clone();
                let url = url.clone();
                let query = [
                    ("access_key", key),
                    ("symbols", symbol.to_string()),
                    ("date_from", date_from.clone()),
                    ("date_to", date_to.clone()),
                    ("sort", "ASC".to_string()),
                    ("limit", limit.clone()),
                ];
                async move {
                    let response = client.get(&url).query(&query).send().await?;

                    if !response.status().is_success() {
                        return Err(AppError::api(
                            PROVIDER,
                            format!("eod request failed: HTTP {}", response.status()),
                        )
                        .into());
                    }

                    response
                        .json::<EodPayload>()
                        .await
                        .map_err(|e| AppError::parse(PROVIDER, e.to_string()).into())
                }
            })
            .await?;

        let mut points = Vec::with_capacity(payload.data.len());
        for row in payload.data {
            points.push(TimeSeriesPoint::new(parse_eod_date(&row.date)?, row.close));
        }

        // The provider is asked for ascending order, but never trust it.
        points.sort_by_key(|p| p.timestamp);

        debug!(
            "eod series for {}: {} points between {} and {}",
            symbol,
            points.len(),
            from,
            to
        );

        Ok(points)
    }
}

#[async_trait]
impl SeriesProvider for MarketstackClient {
    async fn series(
        &self,
        symbol: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<TimeSeriesPoint>> {
        self.fetch_eod(symbol, from, to).await
    }
}

/// Marketstack dates look like `2024-01-05T00:00:00+0000`, which is close
/// to but not exactly RFC 3339.
fn parse_eod_date(raw: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .or_else(|_| DateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%z"))
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| AppError::parse(PROVIDER, format!("bad date '{}': {}", raw, e)).into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn parses_provider_date_format() {
        let dt = parse_eod_date("2024-01-05T00:00:00+0000").unwrap();
        assert_eq!(dt.date_naive(), NaiveDate::from_ymd_opt(2024, 1, 5).unwrap());
        assert_eq!(dt.hour(), 0);
    }

    #[test]
    fn parses_rfc3339_dates_too() {
        assert!(parse_eod_date("2024-01-05T00:00:00+00:00").is_ok());
        assert!(parse_eod_date("not-a-date").is_err());
    }
}
