use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

/// Backoff policy for startup operations (pool creation, first ping).
///
/// Request-path queries never go through this: a failed repository call is
/// reported to the caller on the first error.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Retries after the first attempt
    pub max_retries: u32,
    pub initial_delay: Duration,
    pub max_delay: Duration,
    pub backoff_multiplier: f64,
    pub use_jitter: bool,
}

impl RetryConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = delay;
        self
    }

    pub fn without_jitter(mut self) -> Self {
        self.use_jitter = false;
        self
    }

    /// Delay before retry number `attempt` (1-based), capped at `max_delay`.
    fn delay_for(&self, attempt: u32) -> Duration {
        let factor = self.backoff_multiplier.powi(attempt.saturating_sub(1) as i32);
        let base = self.initial_delay.mul_f64(factor).min(self.max_delay);
        if self.use_jitter { jitter(base) } else { base }
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 5,
            initial_delay: Duration::from_millis(200),
            max_delay: Duration::from_secs(5),
            backoff_multiplier: 2.0,
            use_jitter: true,
        }
    }
}

/// Runs `operation` until it succeeds or the retry budget is spent.
pub async fn retry_with_backoff<F, Fut, T, E>(mut operation: F, config: RetryConfig) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    let mut attempt = 0;

    loop {
        match operation().await {
            Ok(value) => {
                if attempt > 0 {
                    debug!(retries = attempt, "Operation succeeded after retrying");
                }
                return Ok(value);
            }
            Err(e) if attempt >= config.max_retries => {
                warn!(attempts = attempt + 1, error = %e, "Giving up after retries");
                return Err(e);
            }
            Err(e) => {
                attempt += 1;
                let delay = config.delay_for(attempt);
                debug!(
                    attempt,
                    max_retries = config.max_retries,
                    delay_ms = delay.as_millis() as u64,
                    error = %e,
                    "Operation failed, retrying"
                );
                tokio::time::sleep(delay).await;
            }
        }
    }
}

/// [`retry_with_backoff`] with [`RetryConfig::default`].
pub async fn retry<F, Fut, T, E>(operation: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    retry_with_backoff(operation, RetryConfig::default()).await
}

// Scales the delay into [50%, 100%] so restarted replicas do not reconnect in lockstep.
fn jitter(delay: Duration) -> Duration {
    use std::collections::hash_map::RandomState;
    use std::hash::BuildHasher;

    let seed = RandomState::new().hash_one(std::time::SystemTime::now());
    let factor = 0.5 + (seed % 51) as f64 / 100.0;
    delay.mul_f64(factor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn fast() -> RetryConfig {
        RetryConfig::new()
            .with_initial_delay(Duration::from_millis(5))
            .without_jitter()
    }

    #[tokio::test]
    async fn test_retry_succeeds_after_transient_failures() {
        let calls = Arc::new(AtomicU32::new(0));

        let result = retry_with_backoff(
            || {
                let calls = calls.clone();
                async move {
                    match calls.fetch_add(1, Ordering::SeqCst) {
                        0 | 1 => Err("connection refused"),
                        _ => Ok("connected"),
                    }
                }
            },
            fast(),
        )
        .await;

        assert_eq!(result, Ok("connected"));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_retry_gives_up_after_budget() {
        let calls = Arc::new(AtomicU32::new(0));

        let result: Result<(), _> = retry_with_backoff(
            || {
                let calls = calls.clone();
                async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Err("still down")
                }
            },
            fast().with_max_retries(2),
        )
        .await;

        assert_eq!(result, Err("still down"));
        // first attempt + 2 retries
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_delay_grows_and_is_capped() {
        let config = RetryConfig {
            max_retries: 10,
            initial_delay: Duration::from_millis(100),
            max_delay: Duration::from_millis(500),
            backoff_multiplier: 2.0,
            use_jitter: false,
        };

        assert_eq!(config.delay_for(1), Duration::from_millis(100));
        assert_eq!(config.delay_for(2), Duration::from_millis(200));
        assert_eq!(config.delay_for(3), Duration::from_millis(400));
        assert_eq!(config.delay_for(4), Duration::from_millis(500));
    }

    #[test]
    fn test_jitter_stays_within_half_to_full() {
        let delay = Duration::from_millis(1000);
        for _ in 0..20 {
            let jittered = jitter(delay);
            assert!(jittered >= Duration::from_millis(500));
            assert!(jittered <= delay);
        }
    }
}
