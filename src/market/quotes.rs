use futures::future::join_all;
use indexmap::{IndexMap, IndexSet};
use std::sync::Arc;
use tracing::{info, warn};

use super::types::Quote;
use super::QuoteProvider;
use crate::errors::Result;
use crate::utils::Validator;

/// Batch quote fetcher with per-symbol failure isolation.
pub struct QuoteFetcher {
    provider: Arc<dyn QuoteProvider>,
}

impl QuoteFetcher {
    pub fn new(provider: Arc<dyn QuoteProvider>) -> Self {
        Self { provider }
    }

    /// Fetch latest quotes for every distinct symbol in `symbols`,
    /// concurrently.
    ///
    /// The batch is validated before any network traffic: a malformed
    /// symbol or an over-cap batch rejects the whole call. Past that
    /// point, the result has exactly one entry per distinct symbol, in
    /// first-seen order. A symbol whose fetch failed (including
    /// credential-pool exhaustion) is present as an `Err` entry; one bad
    /// symbol never aborts the batch. Callers decide how to render
    /// failures.
    pub async fn fetch_quotes(&self, symbols: &[String]) -> Result<IndexMap<String, Result<Quote>>> {
        if symbols.is_empty() {
            return Ok(IndexMap::new());
        }

        Validator::validate_symbols(symbols)?;

        let distinct: IndexSet<String> = symbols.iter().cloned().collect();

        let lookups = distinct.into_iter().map(|symbol| async move {
            let result = self.provider.quote(&symbol).await;
            (symbol, result)
        });

        let mut quotes = IndexMap::new();
        for (symbol, result) in join_all(lookups).await {
            if let Err(e) = &result {
                warn!("quote fetch for {} failed: {}", symbol, e);
            }
            quotes.insert(symbol, result);
        }

        let failed = quotes.values().filter(|r| r.is_err()).count();
        info!(
            "fetched quotes for {} symbols ({} failed)",
            quotes.len(),
            failed
        );

        Ok(quotes)
    }
}
