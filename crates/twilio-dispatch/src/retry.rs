//! Retry policy for transient network failures.

use std::future::Future;
use std::time::Duration;

use campaign_core::DispatchError;
use tracing::warn;

use crate::config::{DEFAULT_MAX_ATTEMPTS, DEFAULT_RETRY_DELAY_MS};

/// Normalized socket-level error codes considered transient.
pub const TRANSIENT_CODES: &[&str] = &[
    "ECONNRESET",
    "ENOTFOUND",
    "ETIMEDOUT",
    "EAI_AGAIN",
    "ESOCKETTIMEDOUT",
    "ECONNABORTED",
];

/// Default transient predicate: membership in [`TRANSIENT_CODES`].
pub fn is_transient_code(code: &str) -> bool {
    TRANSIENT_CODES.contains(&code)
}

/// How many times to try a send and how long to wait in between.
///
/// Attempt 1 runs immediately; after failed attempt `n` the policy waits
/// `base_delay * n`. Only errors whose [`DispatchError::code`] satisfies
/// `is_transient` are retried; everything else propagates at once.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Total attempts, including the first. Values below 1 are treated as 1.
    pub max_attempts: u32,
    /// Base delay for linear backoff.
    pub base_delay: Duration,
    /// Classifies normalized error codes as transient.
    pub is_transient: fn(&str) -> bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            base_delay: Duration::from_millis(DEFAULT_RETRY_DELAY_MS),
            is_transient: is_transient_code,
        }
    }
}

impl RetryPolicy {
    /// Create a policy with the default transient predicate.
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts,
            base_delay,
            is_transient: is_transient_code,
        }
    }

    /// A policy that never retries.
    pub fn no_retry() -> Self {
        Self::new(1, Duration::ZERO)
    }

    /// Replace the transient predicate.
    pub fn with_predicate(mut self, is_transient: fn(&str) -> bool) -> Self {
        self.is_transient = is_transient;
        self
    }

    /// Delay to wait after failed attempt number `attempt` (1-based).
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.base_delay.saturating_mul(attempt)
    }

    /// Whether a failure on attempt number `attempt` should be retried.
    pub fn should_retry(&self, error: &DispatchError, attempt: u32) -> bool {
        attempt < self.max_attempts.max(1)
            && error.code().is_some_and(|code| (self.is_transient)(&code))
    }

    /// Run `operation` until it succeeds, fails permanently, or attempts run out.
    ///
    /// The operation receives the 1-based attempt number. On success returns
    /// the value and the attempt it succeeded on; otherwise the last error.
    pub async fn run<T, F, Fut>(&self, mut operation: F) -> Result<(T, u32), DispatchError>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, DispatchError>>,
    {
        let mut attempt = 1;

        loop {
            match operation(attempt).await {
                Ok(value) => return Ok((value, attempt)),
                Err(error) if self.should_retry(&error, attempt) => {
                    let delay = self.delay_for(attempt);
                    let code = error.code().unwrap_or_default();
                    warn!(
                        attempt,
                        max_attempts = self.max_attempts,
                        code = %code,
                        delay = ?delay,
                        error = %error,
                        "Transient send failure, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(error) => return Err(error),
            }
        }
    }
}
