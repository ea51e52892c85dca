use async_trait::async_trait;
use chrono::{NaiveDate, TimeZone, Utc};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::api::finnhub::change_percent;
use crate::errors::{AppError, Result};
use crate::market::types::{Interval, Quote};
use crate::market::{QuoteFetcher, QuoteProvider};

#[test]
fn provider_reported_change_wins() {
    assert_eq!(change_percent(105.0, 100.0, Some(4.2)), 4.2);
}

#[test]
fn change_falls_back_to_previous_close() {
    assert_eq!(change_percent(105.0, 100.0, None), 5.0);
    assert_eq!(change_percent(95.0, 100.0, None), -5.0);
}

#[test]
fn zero_previous_close_means_zero_change() {
    assert_eq!(change_percent(105.0, 0.0, None), 0.0);
}

#[test]
fn interval_offsets_are_fixed() {
    // A Wednesday; no weekend adjustment applies.
    let now = Utc.with_ymd_and_hms(2024, 6, 12, 15, 0, 0).unwrap();
    let cases = [
        (Interval::Day, 1),
        (Interval::Week, 7),
        (Interval::Month, 30),
        (Interval::Quarter, 90),
        (Interval::Year, 365),
    ];

    for (interval, days) in cases {
        let (from, to) = interval.date_range(now);
        assert_eq!(to, NaiveDate::from_ymd_opt(2024, 6, 12).unwrap());
        assert_eq!((to - from).num_days(), days, "{} offset", interval);
    }
}

#[test]
fn day_range_slides_off_weekends() {
    let friday = NaiveDate::from_ymd_opt(2024, 6, 14).unwrap();

    // Saturday and Sunday both end on the preceding Friday.
    for day in [15, 16] {
        let now = Utc.with_ymd_and_hms(2024, 6, day, 9, 0, 0).unwrap();
        let (from, to) = Interval::Day.date_range(now);
        assert_eq!(to, friday);
        assert_eq!((to - from).num_days(), 1);
    }
}

#[test]
fn longer_intervals_ignore_weekends() {
    // Saturday
    let now = Utc.with_ymd_and_hms(2024, 6, 15, 9, 0, 0).unwrap();
    let (_, to) = Interval::Week.date_range(now);
    assert_eq!(to, NaiveDate::from_ymd_opt(2024, 6, 15).unwrap());
}

#[test]
fn interval_labels_round_trip() {
    for interval in Interval::ALL {
        assert_eq!(interval.label().parse::<Interval>().unwrap(), interval);
    }
    assert!("fortnight".parse::<Interval>().is_err());
}

#[test]
fn single_letters_are_tickers_not_intervals() {
    // "M" is Macy's, "D" is Dominion; none of these may parse as an
    // interval switch.
    for letter in ["D", "W", "M", "Q", "Y"] {
        assert!(letter.parse::<Interval>().is_err(), "{} must not parse", letter);
    }
}

/// Quote provider that fails configured symbols and counts calls.
struct PartialQuotes {
    failing: Vec<String>,
    calls: AtomicUsize,
}

#[async_trait]
impl QuoteProvider for PartialQuotes {
    async fn quote(&self, symbol: &str) -> Result<Quote> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.iter().any(|s| s == symbol) {
            return Err(AppError::api("test", format!("no data for {}", symbol)).into());
        }
        Ok(Quote {
            symbol: symbol.to_string(),
            price: 100.0,
            change_percent: 1.0,
        })
    }
}

fn symbols(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

#[tokio::test]
async fn batch_has_one_entry_per_symbol_with_failures_as_err() {
    let provider = Arc::new(PartialQuotes {
        failing: vec!["BAD".to_string()],
        calls: AtomicUsize::new(0),
    });
    let fetcher = QuoteFetcher::new(provider);

    let quotes = fetcher
        .fetch_quotes(&symbols(&["AAPL", "BAD", "TSLA"]))
        .await
        .unwrap();

    assert_eq!(quotes.len(), 3);
    assert!(quotes["AAPL"].is_ok());
    assert!(quotes["BAD"].is_err());
    assert!(quotes["TSLA"].is_ok());

    // Insertion order matches request order.
    let order: Vec<&str> = quotes.keys().map(String::as_str).collect();
    assert_eq!(order, vec!["AAPL", "BAD", "TSLA"]);
}

#[tokio::test]
async fn duplicate_symbols_collapse_to_one_lookup() {
    let provider = Arc::new(PartialQuotes {
        failing: Vec::new(),
        calls: AtomicUsize::new(0),
    });
    let fetcher = QuoteFetcher::new(provider.clone());

    let quotes = fetcher
        .fetch_quotes(&symbols(&["AAPL", "AAPL", "TSLA", "AAPL"]))
        .await
        .unwrap();

    assert_eq!(quotes.len(), 2);
    assert_eq!(provider.calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn empty_batch_is_empty_map() {
    let provider = Arc::new(PartialQuotes {
        failing: Vec::new(),
        calls: AtomicUsize::new(0),
    });
    let fetcher = QuoteFetcher::new(provider);

    assert!(fetcher.fetch_quotes(&[]).await.unwrap().is_empty());
}

#[tokio::test]
async fn oversized_batch_is_rejected_before_any_lookup() {
    let provider = Arc::new(PartialQuotes {
        failing: Vec::new(),
        calls: AtomicUsize::new(0),
    });
    let fetcher = QuoteFetcher::new(provider.clone());

    let too_many: Vec<String> = (0..150).map(|i| format!("SYM{}", i)).collect();
    let err = fetcher.fetch_quotes(&too_many).await.unwrap_err();

    assert!(matches!(
        err.downcast_ref::<AppError>(),
        Some(AppError::Validation(_))
    ));
    assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn malformed_symbol_rejects_the_batch() {
    let provider = Arc::new(PartialQuotes {
        failing: Vec::new(),
        calls: AtomicUsize::new(0),
    });
    let fetcher = QuoteFetcher::new(provider.clone());

    let batch = symbols(&["AAPL", "not a symbol!"]);
    assert!(fetcher.fetch_quotes(&batch).await.is_err());
    assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
}
