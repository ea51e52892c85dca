use chrono::{DateTime, NaiveDate, Utc};
use reqwest::Client;
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;

use crate::api::key_pool::KeyPool;
use crate::constants::NEWS_API_BASE_URL;
use crate::errors::{AppError, Result};
use crate::market::types::Article;

const PROVIDER: &str = "news";

/// Client for market-wide and company news feeds.
#[derive(Clone)]
pub struct NewsClient {
    client: Client,
    pool: Arc<KeyPool>,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct ArticleRow {
    headline: String,
    source: String,
    #[serde(default)]
    image: Option<String>,
    url: String,
    /// Unix seconds
    datetime: i64,
}

impl NewsClient {
    pub fn new(keys: Vec<String>) -> Result<Self> {
        Ok(Self {
            client: super::http_client()?,
            pool: Arc::new(KeyPool::new(PROVIDER, keys)?),
            base_url: NEWS_API_BASE_URL.to_string(),
        })
    }

    /// Fetch market-wide headlines for a category (e.g. "general", "crypto").
    pub async fn market_news(&self, category: &str) -> Result<Vec<Article>> {
        let url = format!(
            "{}/news?category={}",
            self.base_url,
            urlencoding::encode(category)
        );

        let rows = self.fetch_articles("market_news", url).await?;
        debug!("{} articles for category '{}'", rows.len(), category);
        Ok(rows)
    }

    /// Fetch articles mentioning one symbol within a date range.
    pub async fn company_news(
        &self,
        symbol: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Article>> {
        let url = format!(
            "{}/company-news?symbol={}&from={}&to={}",
            self.base_url,
            urlencoding::encode(symbol),
            from,
            to
        );

        let rows = self.fetch_articles("company_news", url).await?;
        debug!("{} articles for symbol '{}'", rows.len(), symbol);
        Ok(rows)
    }

    async fn fetch_articles(&self, operation: &str, url: String) -> Result<Vec<Article>> {
        let rows: Vec<ArticleRow> = self
            .pool
            .try_with_rotation(operation, |key| {
                let client = self.client.clone();
                let url = url.clone();
                async move {
                    let response = client.get(&url).query(&[("token", &key)]).send().await?;

                    if !response.status().is_success() {
                        return Err(AppError::api(
                            PROVIDER,
                            format!("news request failed: HTTP {}", response.status()),
                        )
                        .into());
                    }

                    response
                        .json::<Vec<ArticleRow>>()
                        .await
                        .map_err(|e| AppError::parse(PROVIDER, e.to_string()).into())
                }
            })
            .await?;

        Ok(rows
            .into_iter()
            .map(|row| Article {
                headline: row.headline,
                source: row.source,
                image_url: row.image.filter(|u| !u.is_empty()),
                article_url: row.url,
                published_at: DateTime::<Utc>::from_timestamp(row.datetime, 0)
                    .unwrap_or_else(Utc::now),
            })
            .collect())
    }
}
