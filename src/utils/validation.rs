use regex::Regex;
use std::sync::LazyLock;

use crate::constants::{MAX_BATCH_SYMBOLS, MAX_SYMBOL_LEN};
use crate::errors::{AppError, Result};

static SYMBOL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z0-9][A-Z0-9.\-]*$").expect("symbol regex"));

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email regex"));

pub struct Validator;

impl Validator {
    /// Validate a ticker symbol (e.g. "AAPL", "BRK.B", "BTC-USD").
    pub fn validate_symbol(symbol: &str) -> Result<()> {
        if symbol.is_empty() {
            return Err(AppError::validation("symbol must not be empty").into());
        }

        if symbol.len() > MAX_SYMBOL_LEN {
            return Err(AppError::validation(format!(
                "symbol '{}' exceeds {} characters",
                symbol, MAX_SYMBOL_LEN
            ))
            .into());
        }

        if !SYMBOL_RE.is_match(symbol) {
            return Err(
                AppError::validation(format!("symbol '{}' has invalid characters", symbol)).into(),
            );
        }

        Ok(())
    }

    /// Validate a batch of symbols for a single fan-out request.
    pub fn validate_symbols(symbols: &[String]) -> Result<()> {
        if symbols.is_empty() {
            return Err(AppError::validation("symbol list must not be empty").into());
        }

        if symbols.len() > MAX_BATCH_SYMBOLS {
            return Err(AppError::validation(format!(
                "at most {} symbols per batch",
                MAX_BATCH_SYMBOLS
            ))
            .into());
        }

        for symbol in symbols {
            Self::validate_symbol(symbol)?;
        }

        Ok(())
    }

    pub fn validate_email(email: &str) -> Result<()> {
        if !EMAIL_RE.is_match(email) {
            return Err(AppError::validation(format!("'{}' is not a valid email", email)).into());
        }

        Ok(())
    }

    /// Passwords only need a length floor; the auth store enforces the rest.
    pub fn validate_password(password: &str) -> Result<()> {
        if password.len() < 6 {
            return Err(AppError::validation("password must be at least 6 characters").into());
        }

        Ok(())
    }
}
