use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::env;

use crate::constants::{EOD_BUCKET_CAPACITY, EOD_REFILL_PER_SEC, PROFILE_API_BASE_URL};
use crate::errors::AppError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    // Credential pools, in rotation order
    pub quote_api_keys: Vec<String>,
    pub eod_api_keys: Vec<String>,
    pub news_api_keys: Vec<String>,

    // Auth/profile store
    pub profile_base_url: String,
    pub profile_api_key: String,

    // Default watchlist used when the caller supplies no symbols
    pub watchlist: Vec<String>,

    // EOD provider throttle
    pub eod_bucket_capacity: f64,
    pub eod_refill_per_sec: f64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            quote_api_keys: Self::parse_key_pool(
                &env::var("QUOTE_API_KEYS")
                    .map_err(|_| AppError::config("QUOTE_API_KEYS not set"))?,
            ),
            eod_api_keys: Self::parse_key_pool(
                &env::var("EOD_API_KEYS").map_err(|_| AppError::config("EOD_API_KEYS not set"))?,
            ),
            // The news provider shares the quote provider's pool unless
            // given its own keys.
            news_api_keys: env::var("NEWS_API_KEYS")
                .map(|v| Self::parse_key_pool(&v))
                .unwrap_or_default(),

            profile_base_url: env::var("PROFILE_BASE_URL")
                .unwrap_or_else(|_| PROFILE_API_BASE_URL.to_string()),
            profile_api_key: env::var("PROFILE_API_KEY")
                .map_err(|_| AppError::config("PROFILE_API_KEY not set"))?,

            watchlist: env::var("WATCHLIST")
                .unwrap_or_else(|_| String::new())
                .split(',')
                .filter(|s| !s.trim().is_empty())
                .map(|s| s.trim().to_uppercase())
                .collect(),

            eod_bucket_capacity: env::var("EOD_BUCKET_CAPACITY")
                .unwrap_or_else(|_| EOD_BUCKET_CAPACITY.to_string())
                .parse()
                .unwrap_or(EOD_BUCKET_CAPACITY),
            eod_refill_per_sec: env::var("EOD_REFILL_PER_SEC")
                .unwrap_or_else(|_| EOD_REFILL_PER_SEC.to_string())
                .parse()
                .unwrap_or(EOD_REFILL_PER_SEC),
        })
    }

    fn parse_key_pool(raw: &str) -> Vec<String> {
        raw.split(',')
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect()
    }

    pub fn validate(&self) -> Result<()> {
        if self.quote_api_keys.is_empty() {
            return Err(AppError::config("quote credential pool is empty").into());
        }

        if self.eod_api_keys.is_empty() {
            return Err(AppError::config("EOD credential pool is empty").into());
        }

        if self.eod_refill_per_sec <= 0.0 || self.eod_bucket_capacity < 1.0 {
            return Err(AppError::config("EOD throttle settings must be positive").into());
        }

        Ok(())
    }

    /// Pool used for news requests, falling back to the quote pool.
    pub fn news_keys(&self) -> &[String] {
        if self.news_api_keys.is_empty() {
            &self.quote_api_keys
        } else {
            &self.news_api_keys
        }
    }
}
