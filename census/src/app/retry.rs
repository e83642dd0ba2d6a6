//! Bounded retries
//!
//! A fixed-delay retry policy applied to one remote call at a time. Running
//! out of attempts is an outcome, not an error: callers decide whether to
//! substitute an empty result or to stop paging.

use std::fmt::Display;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::config::{DEFAULT_RETRY_DELAY_SECS, DEFAULT_RETRY_LIMIT};
use crate::domain::ports::Sleeper;
use crate::error::GitHubError;

/// Errors that know whether repeating the request can help
pub trait Transient {
    fn is_transient(&self) -> bool;
}

impl Transient for GitHubError {
    fn is_transient(&self) -> bool {
        GitHubError::is_transient(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt
    pub max_retries: u32,
    /// Wait before each retry
    pub delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_retries: u32, delay: Duration) -> Self {
        Self { max_retries, delay }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(
            DEFAULT_RETRY_LIMIT,
            Duration::from_secs(DEFAULT_RETRY_DELAY_SECS),
        )
    }
}

/// Result of running an operation under a [`RetryPolicy`]
#[derive(Debug)]
pub enum FetchOutcome<T, E> {
    Fetched(T),
    /// Every attempt failed with a transient error
    Exhausted { attempts: u32, error: E },
    /// The operation failed with an error retrying cannot fix
    Rejected(E),
}

impl<T, E> FetchOutcome<T, E> {
    #[cfg(test)]
    pub fn ok(self) -> Option<T> {
        match self {
            FetchOutcome::Fetched(value) => Some(value),
            _ => None,
        }
    }

    pub fn into_result(self) -> Result<T, E> {
        match self {
            FetchOutcome::Fetched(value) => Ok(value),
            FetchOutcome::Exhausted { error, .. } | FetchOutcome::Rejected(error) => Err(error),
        }
    }
}

/// Runs remote calls under a retry policy, sleeping through an injected
/// [`Sleeper`]
pub struct RetryingFetcher<S: Sleeper> {
    policy: RetryPolicy,
    sleeper: Arc<S>,
}

impl<S: Sleeper> Clone for RetryingFetcher<S> {
    fn clone(&self) -> Self {
        Self {
            policy: self.policy,
            sleeper: self.sleeper.clone(),
        }
    }
}

impl<S: Sleeper> RetryingFetcher<S> {
    pub fn new(policy: RetryPolicy, sleeper: Arc<S>) -> Self {
        Self { policy, sleeper }
    }

    /// Run `op` until it succeeds, fails for good, or the budget runs out.
    ///
    /// `operation` names the call in log events.
    pub async fn fetch<T, E, F, Fut>(&self, operation: &str, mut op: F) -> FetchOutcome<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Transient + Display,
    {
        let max_attempts = self.policy.max_attempts();
        let mut attempt = 0;

        loop {
            attempt += 1;
            match op().await {
                Ok(value) => {
                    if attempt > 1 {
                        tracing::debug!(operation, attempt, "Request succeeded after retry");
                    }
                    return FetchOutcome::Fetched(value);
                }
                Err(error) if !error.is_transient() => {
                    tracing::warn!(operation, error = %error, "Request rejected, not retrying");
                    return FetchOutcome::Rejected(error);
                }
                Err(error) => {
                    if attempt >= max_attempts {
                        tracing::warn!(
                            operation,
                            attempts = attempt,
                            error = %error,
                            "Retries exhausted"
                        );
                        return FetchOutcome::Exhausted {
                            attempts: attempt,
                            error,
                        };
                    }

                    tracing::warn!(
                        operation,
                        attempt,
                        max_attempts,
                        delay_secs = self.policy.delay.as_secs(),
                        error = %error,
                        "Request failed, retrying"
                    );
                    self.sleeper.sleep(self.policy.delay).await;
                }
            }
        }
    }
}
