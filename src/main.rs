use anyhow::Result;
use dotenv::dotenv;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use trackfolio::api::{FinnhubClient, MarketstackClient};
use trackfolio::market::Interval;
use trackfolio::middleware::TokenBucket;
use trackfolio::portfolio::PortfolioService;
use trackfolio::utils::{format_percentage, format_usd, format_usd_delta, Config};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;
    config.validate()?;

    // Symbols from the command line, falling back to the configured watchlist.
    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut interval = Interval::Month;
    let mut symbols = Vec::new();
    for arg in args {
        // Interval labels all lead with a digit (1D, 1W, 1M, 3M, 1Y);
        // anything else is a ticker symbol.
        let looks_like_interval = arg.chars().next().is_some_and(|c| c.is_ascii_digit());
        match arg.parse::<Interval>() {
            Ok(parsed) if looks_like_interval => interval = parsed,
            _ => symbols.push(arg.to_uppercase()),
        }
    }
    if symbols.is_empty() {
        symbols = config.watchlist.clone();
    }

    if symbols.is_empty() {
        eprintln!("usage: trackfolio [interval] SYMBOL [SYMBOL...]  (or set WATCHLIST)");
        std::process::exit(2);
    }

    info!("loading {} portfolio for {:?}", interval, symbols);

    let quote_client = Arc::new(FinnhubClient::new(config.quote_api_keys.clone())?);
    let limiter = Arc::new(TokenBucket::new(
        config.eod_bucket_capacity,
        config.eod_refill_per_sec,
    ));
    let eod_client = Arc::new(MarketstackClient::new(config.eod_api_keys.clone(), limiter)?);

    let service = PortfolioService::new(eod_client, quote_client);
    let overview = service.load_overview(&symbols, interval).await?;

    println!("Quotes");
    for (symbol, result) in &overview.quotes {
        match result {
            Ok(quote) => println!(
                "  {:<8} {:>12}  {:>8}",
                symbol,
                format_usd(quote.price),
                format_percentage(quote.change_percent)
            ),
            Err(e) => println!("  {:<8} unavailable ({})", symbol, e),
        }
    }

    let report = &overview.report;
    println!();
    println!(
        "Portfolio over {} ({} of {} symbols, {} points)",
        interval,
        report.contributing,
        symbols.len(),
        report.series.len()
    );
    println!("  total   {}", format_usd(report.total));
    println!("  profit  {}", format_usd_delta(report.profit));
    println!("  min     {}", format_usd(report.min));
    println!("  max     {}", format_usd(report.max));

    Ok(())
}
