pub mod finnhub;
pub mod key_pool;
pub mod marketstack;
pub mod news;
pub mod profile;

pub use finnhub::FinnhubClient;
pub use key_pool::KeyPool;
pub use marketstack::MarketstackClient;
pub use news::NewsClient;
pub use profile::{Profile, ProfileClient, ProfileStore, Session};

use reqwest::Client;

use crate::constants::{HTTP_CONNECT_TIMEOUT, HTTP_REQUEST_TIMEOUT};
use crate::errors::Result;

/// Shared HTTP client with the fixed connect/receive timeouts every
/// provider client uses.
pub fn http_client() -> Result<Client> {
    Ok(Client::builder()
        .connect_timeout(HTTP_CONNECT_TIMEOUT)
        .timeout(HTTP_REQUEST_TIMEOUT)
        .build()?)
}
