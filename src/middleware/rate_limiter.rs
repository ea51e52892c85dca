use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::{sleep, Instant};
use tracing::debug;

/// Token-bucket rate limiter for low-throughput providers.
///
/// The bucket starts full: up to `capacity` requests pass immediately,
/// after which callers are paced at `refill_per_sec`. `acquire` never
/// fails; it waits until a token is available.
pub struct TokenBucket {
    capacity: f64,
    refill_per_sec: f64,
    state: Mutex<BucketState>,
}

struct BucketState {
    tokens: f64,
    last_refill: Instant,
}

impl TokenBucket {
    pub fn new(capacity: f64, refill_per_sec: f64) -> Self {
        assert!(capacity >= 1.0, "bucket must hold at least one token");
        assert!(refill_per_sec > 0.0, "refill rate must be positive");

        Self {
            capacity,
            refill_per_sec,
            state: Mutex::new(BucketState {
                tokens: capacity,
                last_refill: Instant::now(),
            }),
        }
    }

    /// Take one token, waiting for refill when the bucket is empty.
    pub async fn acquire(&self) {
        loop {
            let wait = {
                let mut state = self.state.lock().await;
                self.refill(&mut state);

                if state.tokens >= 1.0 {
                    state.tokens -= 1.0;
                    return;
                }

                // Seconds until one full token accrues.
                Duration::from_secs_f64((1.0 - state.tokens) / self.refill_per_sec)
            };

            debug!("rate limit reached, waiting {:?} for next token", wait);
            sleep(wait).await;
        }
    }

    fn refill(&self, state: &mut BucketState) {
        let now = Instant::now();
        let elapsed = now.duration_since(state.last_refill).as_secs_f64();
        state.tokens = (state.tokens + elapsed * self.refill_per_sec).min(self.capacity);
        state.last_refill = now;
    }
}
