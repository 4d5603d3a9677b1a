use std::future::Future;
use std::time::Duration;

use crate::error::ScrapeError;
use crate::observer::ScrapeObserver;
use crate::utilities::constants::{
    DEFAULT_MAX_ATTEMPTS, DEFAULT_WAIT_INCREMENT_SECS, DEFAULT_WAIT_SECS,
};

/// How often to try an operation and how long each try may wait.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub initial_wait: Duration,
    pub increment: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            initial_wait: Duration::from_secs(DEFAULT_WAIT_SECS),
            increment: Duration::from_secs(DEFAULT_WAIT_INCREMENT_SECS),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, initial_wait: Duration, increment: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            initial_wait,
            increment,
        }
    }

    /// Wait window for a 1-based attempt number.
    pub fn wait_for_attempt(&self, attempt: u32) -> Duration {
        self.initial_wait + self.increment * attempt.saturating_sub(1)
    }
}

/// Runs `action` with a growing wait window until it succeeds, fails with an
/// error `is_retryable` rejects, or the policy runs out of attempts. Every
/// retryable failure, including the last, is reported to the observer.
pub async fn attempt<T, A, Fut, R>(
    policy: &RetryPolicy,
    operation: &str,
    observer: &dyn ScrapeObserver,
    is_retryable: R,
    mut action: A,
) -> Result<T, ScrapeError>
where
    A: FnMut(Duration) -> Fut,
    Fut: Future<Output = Result<T, ScrapeError>>,
    R: Fn(&ScrapeError) -> bool,
{
    let mut attempt_number = 1;
    loop {
        let wait = policy.wait_for_attempt(attempt_number);
        match action(wait).await {
            Ok(value) => return Ok(value),
            Err(e) if is_retryable(&e) => {
                observer.attempt_failed(operation, attempt_number, &e);
                if attempt_number >= policy.max_attempts {
                    return Err(e);
                }
                attempt_number += 1;
            }
            Err(e) => return Err(e),
        }
    }
}
