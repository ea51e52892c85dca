use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;

use crate::api::key_pool::KeyPool;
use crate::constants::QUOTE_API_BASE_URL;
use crate::errors::{AppError, Result};
use crate::market::types::{KeyStats, Quote};
use crate::market::QuoteProvider;

const PROVIDER: &str = "finnhub";

/// Finnhub client for real-time quotes and key statistics.
///
/// Authentication is a `token` query parameter; the credential pool is
/// rotated on any failure, including decode failures, since Finnhub reports
/// quota exhaustion with a 200-status error body.
#[derive(Clone)]
pub struct FinnhubClient {
    client: Client,
    pool: Arc<KeyPool>,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct QuotePayload {
    /// Current price
    c: f64,
    /// Previous close
    pc: f64,
    /// Percent change, absent for some asset classes
    #[serde(default)]
    dp: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct MetricsPayload {
    metric: MetricFields,
}

#[derive(Debug, Default, Deserialize)]
struct MetricFields {
    #[serde(rename = "52WeekHigh")]
    week52_high: Option<f64>,
    #[serde(rename = "52WeekLow")]
    week52_low: Option<f64>,
    #[serde(rename = "marketCapitalization")]
    market_cap: Option<f64>,
    #[serde(rename = "peBasicExclExtraTTM")]
    pe_ratio: Option<f64>,
}

impl FinnhubClient {
    pub fn new(keys: Vec<String>) -> Result<Self> {
        Ok(Self {
            client: super::http_client()?,
            pool: Arc::new(KeyPool::new(PROVIDER, keys)?),
            base_url: QUOTE_API_BASE_URL.to_string(),
        })
    }

    /// Fetch fundamental metrics for one symbol.
    pub async fn key_stats(&self, symbol: &str) -> Result<KeyStats> {
        let url = format!("{}/stock/metric", self.base_url);

        let payload: MetricsPayload = self
            .pool
            .try_with_rotation("key_stats", |key| {
                let client = self.client.clone();
                let url = url.clone();
                async move {
                    let response = client
                        .get(&url)
                        .query(&[("symbol", symbol), ("metric", "all"), ("token", key.as_str())])
                        .send()
                        .await?;

                    if !response.status().is_success() {
                        return Err(AppError::api(
                            PROVIDER,
                            format!("key-stats request failed: HTTP {}", response.status()),
                        )
                        .into());
                    }

                    response
                        .json::<MetricsPayload>()
                        .await
                        .map_err(|e| AppError::parse(PROVIDER, e.to_string()).into())
                }
            })
            .await?;

        Ok(KeyStats {
            symbol: symbol.to_string(),
            week52_high: payload.metric.week52_high,
            week52_low: payload.metric.week52_low,
            market_cap: payload.metric.market_cap,
            pe_ratio: payload.metric.pe_ratio,
        })
    }

    async fn fetch_quote(&self, symbol: &str) -> Result<Quote> {
        let url = format!("{}/quote", self.base_url);

        let payload: QuotePayload = self
            .pool
            .try_with_rotation("quote", |key| {
                let client = self.client.clone();
                let url = url.clone();
                async move {
                    let response = client
                        .get(&url)
                        .query(&[("symbol", symbol), ("token", key.as_str())])
                        .send()
                        .await?;

                    if !response.status().is_success() {
                        return Err(AppError::api(
                            PROVIDER,
                            format!("quote request failed: HTTP {}", response.status()),
                        )
                        .into());
                    }

                    response
                        .json::<QuotePayload>()
                        .await
                        .map_err(|e| AppError::parse(PROVIDER, e.to_string()).into())
                }
            })
            .await?;

        // Finnhub answers unknown symbols with an all-zero payload rather
        // than an error status.
        if payload.c == 0.0 && payload.pc == 0.0 {
            return Err(AppError::api(PROVIDER, format!("no quote data for '{}'", symbol)).into());
        }

        debug!("quote for {}: {} ({:?}%)", symbol, payload.c, payload.dp);

        Ok(Quote {
            symbol: symbol.to_string(),
            price: payload.c,
            change_percent: change_percent(payload.c, payload.pc, payload.dp),
        })
    }
}

#[async_trait]
impl QuoteProvider for FinnhubClient {
    async fn quote(&self, symbol: &str) -> Result<Quote> {
        self.fetch_quote(symbol).await
    }
}

/// Percent change, preferring the provider-reported value and falling back
/// to `(current - previous close) / previous close`.
pub(crate) fn change_percent(current: f64, prev_close: f64, reported: Option<f64>) -> f64 {
    match reported {
        Some(dp) => dp,
        None if prev_close != 0.0 => (current - prev_close) / prev_close * 100.0,
        None => 0.0,
    }
}
