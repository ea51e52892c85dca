/// Utility functions for formatting display values in the CLI.

/// Format a USD amount for display
pub fn format_usd(amount: f64) -> String {
    if amount >= 1_000_000.0 {
        format!("${:.2}M", amount / 1_000_000.0)
    } else if amount >= 1_000.0 {
        format!("${:.2}K", amount / 1_000.0)
    } else if amount >= 1.0 {
        format!("${:.2}", amount)
    } else {
        format!("${:.4}", amount)
    }
}

/// Format a signed percentage for display
pub fn format_percentage(pct: f64) -> String {
    if pct > 0.0 {
        format!("+{:.2}%", pct)
    } else {
        format!("{:.2}%", pct)
    }
}

/// Format a signed USD delta (profit/loss) for display
pub fn format_usd_delta(amount: f64) -> String {
    if amount >= 0.0 {
        format!("+{}", format_usd(amount))
    } else {
        format!("-{}", format_usd(amount.abs()))
    }
}

/// Format market cap for display (provider reports it in millions)
pub fn format_market_cap(mc_millions: f64) -> String {
    if mc_millions >= 1_000_000.0 {
        format!("{:.2}T", mc_millions / 1_000_000.0)
    } else if mc_millions >= 1_000.0 {
        format!("{:.2}B", mc_millions / 1_000.0)
    } else {
        format!("{:.1}M", mc_millions)
    }
}
