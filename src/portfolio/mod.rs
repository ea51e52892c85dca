pub mod aggregator;
pub mod types;

pub use aggregator::{combine_by_date, combine_truncated, PortfolioOverview, PortfolioService};
pub use types::{DatedPoint, PortfolioReport};
