use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::{debug, error, warn};

use crate::errors::{AppError, Result};

/// Ordered pool of API credentials for one provider.
///
/// A request tries the current credential first and rotates through the rest
/// on failure. The cursor sticks to whichever key last succeeded, so a dead
/// or over-quota key is only retried once per pass instead of on every call.
pub struct KeyPool {
    provider: &'static str,
    keys: Vec<String>,
    cursor: AtomicUsize,
}

impl KeyPool {
    pub fn new(provider: &'static str, keys: Vec<String>) -> Result<Self> {
        if keys.is_empty() {
            return Err(
                AppError::config(format!("credential pool for {} is empty", provider)).into(),
            );
        }

        Ok(Self {
            provider,
            keys,
            cursor: AtomicUsize::new(0),
        })
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Run `f` with each credential in rotation order until one succeeds.
    ///
    /// Returns the first success, or `AppError::KeysExhausted` after every
    /// key in the pool has failed for this request.
    pub async fn try_with_rotation<T, F, Fut>(&self, operation: &str, mut f: F) -> Result<T>
    where
        F: FnMut(String) -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let start = self.cursor.load(Ordering::Relaxed) % self.keys.len();
        let mut last_err = None;

        for attempt in 0..self.keys.len() {
            let idx = (start + attempt) % self.keys.len();
            match f(self.keys[idx].clone()).await {
                Ok(value) => {
                    if attempt > 0 {
                        debug!(
                            "{}: {} succeeded after rotating to credential #{}",
                            self.provider, operation, idx
                        );
                        self.cursor.store(idx, Ordering::Relaxed);
                    }
                    return Ok(value);
                }
                Err(e) => {
                    warn!(
                        "{}: {} failed with credential #{}: {}",
                        self.provider, operation, idx, e
                    );
                    last_err = Some(e);
                }
            }
        }

        error!(
            "{}: {} exhausted all {} credentials (last error: {})",
            self.provider,
            operation,
            self.keys.len(),
            last_err
                .as_ref()
                .map(|e| e.to_string())
                .unwrap_or_else(|| "none".to_string()),
        );

        Err(AppError::KeysExhausted {
            provider: self.provider,
            attempts: self.keys.len(),
        }
        .into())
    }
}
