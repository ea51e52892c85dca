mod config;
mod validation;
pub mod formatting;

pub use config::Config;
pub use validation::Validator;
pub use formatting::{format_market_cap, format_percentage, format_usd, format_usd_delta};
