//! Market-data aggregation for a simulated stock-trading client.
//!
//! Wraps a handful of third-party REST providers (quotes, end-of-day
//! series, news, auth/profile) behind credential-rotating clients, and
//! builds a combined portfolio value curve out of the user's favorite
//! symbols.

pub mod api;
pub mod constants;
pub mod errors;
pub mod market;
pub mod middleware;
pub mod portfolio;
pub mod session;
pub mod utils;

pub use errors::{AppError, Result};

#[cfg(test)]
mod tests;
