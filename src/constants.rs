use std::time::Duration;

// Provider endpoints
pub const QUOTE_API_BASE_URL: &str = "https://finnhub.io/api/v1";
pub const EOD_API_BASE_URL: &str = "https://api.marketstack.com/v1";
pub const NEWS_API_BASE_URL: &str = "https://finnhub.io/api/v1";
pub const PROFILE_API_BASE_URL: &str = "https://identity.trackfolio.app/v1";

// Fixed HTTP timeouts; providers that take longer are treated as failed
// and the credential pool rotates.
pub const HTTP_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
pub const HTTP_REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

// Batch limits
pub const MAX_BATCH_SYMBOLS: usize = 100;
pub const MAX_SYMBOL_LEN: usize = 12;

// Default throttle for the low-throughput EOD provider
pub const EOD_BUCKET_CAPACITY: f64 = 5.0;
pub const EOD_REFILL_PER_SEC: f64 = 1.0;

// Largest page we ever request from the EOD endpoint (one year of closes).
pub const EOD_PAGE_LIMIT: u32 = 366;
