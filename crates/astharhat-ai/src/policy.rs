//! Timeout and retry policies for model calls.

use std::future::Future;
use std::time::Duration;

use tracing::debug;

use crate::AiError;

/// Default bound on a single attempt.
pub const DEFAULT_ATTEMPT_TIMEOUT: Duration = Duration::from_secs(20);
/// Default number of retries after the first attempt.
pub const DEFAULT_MAX_RETRIES: u32 = 2;

/// Backoff strategy between retry attempts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackoffStrategy {
    /// No delay between retries.
    None,
    /// Fixed delay between retries.
    Fixed(Duration),
    /// Exponential backoff with base and max.
    Exponential {
        /// Initial delay.
        base: Duration,
        /// Maximum delay.
        max: Duration,
    },
}

impl BackoffStrategy {
    /// Calculate delay for a given retry number (0-indexed).
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        match self {
            Self::None => Duration::ZERO,
            Self::Fixed(d) => *d,
            Self::Exponential { base, max } => {
                let multiplier = 2u32.saturating_pow(attempt);
                std::cmp::min(base.saturating_mul(multiplier), *max)
            }
        }
    }
}

impl Default for BackoffStrategy {
    fn default() -> Self {
        Self::Exponential {
            base: Duration::from_millis(500),
            max: Duration::from_secs(4),
        }
    }
}

/// Retry policy configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum number of retries after the first attempt.
    pub max_retries: u32,
    /// Backoff strategy.
    pub backoff: BackoffStrategy,
}

impl RetryPolicy {
    /// Create a new retry policy.
    pub fn new(max_retries: u32) -> Self {
        Self {
            max_retries,
            backoff: BackoffStrategy::default(),
        }
    }

    /// Create a policy with no retries.
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            backoff: BackoffStrategy::None,
        }
    }

    /// Set backoff strategy.
    pub fn with_backoff(mut self, strategy: BackoffStrategy) -> Self {
        self.backoff = strategy;
        self
    }

    /// Check if a failed attempt should be retried.
    pub fn should_retry(&self, error: &AiError, attempt: u32) -> bool {
        attempt < self.max_retries && error.is_retryable()
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_RETRIES)
    }
}

/// Timeout plus retry, applied to every outbound model call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestPolicy {
    /// Bound on each attempt.
    pub attempt_timeout: Duration,
    /// Retry policy.
    pub retry: RetryPolicy,
}

impl RequestPolicy {
    /// Create a new request policy.
    pub fn new(attempt_timeout: Duration, retry: RetryPolicy) -> Self {
        Self {
            attempt_timeout,
            retry,
        }
    }

    /// Run `op` under this policy.
    ///
    /// Each attempt is cut off after `attempt_timeout`. Retryable failures
    /// are retried after the backoff delay until retries run out.
    pub async fn execute<T, F, Fut>(&self, mut op: F) -> Result<T, AiError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, AiError>>,
    {
        let mut attempt = 0;
        loop {
            let result = match tokio::time::timeout(self.attempt_timeout, op()).await {
                Ok(result) => result,
                Err(_) => Err(AiError::Timeout(self.attempt_timeout)),
            };

            match result {
                Ok(value) => return Ok(value),
                Err(e) if self.retry.should_retry(&e, attempt) => {
                    let delay = self.retry.backoff.delay_for_attempt(attempt);
                    debug!(attempt, error = %e, delay_ms = delay.as_millis() as u64, "retrying model call");
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

impl Default for RequestPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_ATTEMPT_TIMEOUT, RetryPolicy::default())
    }
}
