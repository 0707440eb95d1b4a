//! Bounded retry with a fixed delay.
//!
//! Each call to [`RetryPolicy::run`] is independent: no state is carried
//! between invocations. The delay is constant and is not applied after the
//! final attempt.

use std::fmt;
use std::future::Future;
use std::time::Duration;

use thiserror::Error;

use crate::config::MarketplaceConfig;

/// Attempts made by [`RetryPolicy::default`].
pub const DEFAULT_MAX_ATTEMPTS: u32 = 10;

/// Delay used by [`RetryPolicy::default`].
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(2);

/// Every attempt failed. Recoverable; callers decide what absence means.
#[derive(Debug, Error)]
#[error("gave up after {attempts} attempts: {last_error}")]
pub struct RetryExhausted<E> {
    pub attempts: u32,
    pub last_error: E,
}

/// Fixed-delay retry policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ATTEMPTS, DEFAULT_RETRY_DELAY)
    }
}

impl RetryPolicy {
    /// `max_attempts` counts the first call; values below 1 are raised to 1.
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delay,
        }
    }

    pub fn from_config(config: &MarketplaceConfig) -> Self {
        Self::new(config.retry_attempts, config.retry_delay())
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Run `op` until it succeeds or the attempts run out.
    ///
    /// `operation` only labels log lines.
    pub async fn run<T, E, F, Fut>(&self, operation: &str, mut op: F) -> Result<T, RetryExhausted<E>>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: fmt::Display,
    {
        let mut attempt = 1;
        loop {
            match op().await {
                Ok(value) => {
                    if attempt > 1 {
                        tracing::debug!(operation, attempt, "succeeded after retry");
                    }
                    return Ok(value);
                }
                Err(error) if attempt >= self.max_attempts => {
                    tracing::warn!(
                        operation,
                        attempts = attempt,
                        error = %error,
                        "retries exhausted"
                    );
                    return Err(RetryExhausted {
                        attempts: attempt,
                        last_error: error,
                    });
                }
                Err(error) => {
                    tracing::debug!(
                        operation,
                        attempt,
                        max_attempts = self.max_attempts,
                        error = %error,
                        "attempt failed, retrying"
                    );
                    tokio::time::sleep(self.delay).await;
                    attempt += 1;
                }
            }
        }
    }
}
