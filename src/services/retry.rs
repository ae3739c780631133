// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Retry with multiplicative backoff for read endpoints.

use crate::config::{Config, MAX_RETRY_ATTEMPTS};
use crate::error::Result;
use std::future::Future;
use std::time::Duration;

/// Backoff growth per retry.
const BACKOFF_MULTIPLIER: f64 = 1.5;

/// How often and how patiently to retry a failing read.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryPolicy {
    /// Total attempts, including the first one
    pub attempts: u32,
    /// Delay before the first retry
    pub base_delay: Duration,
}

impl RetryPolicy {
    pub fn from_config(config: &Config) -> Self {
        Self {
            attempts: config.retry_attempts.clamp(1, MAX_RETRY_ATTEMPTS),
            base_delay: config.retry_delay,
        }
    }

    /// Delays slept between attempts: base, base×1.5, base×1.5², ...
    ///
    /// Saturates at `Duration::MAX` instead of overflowing.
    pub fn delays(&self) -> impl Iterator<Item = Duration> {
        std::iter::successors(Some(self.base_delay), |delay| Some(grow(*delay)))
            .take(self.attempts.saturating_sub(1) as usize)
    }

    /// Run `op` until it succeeds or the attempts are exhausted.
    ///
    /// Returns the last error when every attempt fails.
    pub async fn run<T, F, Fut>(&self, label: &str, mut op: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let retries = self.attempts.saturating_sub(1);
        let mut delays = self.delays();
        let mut attempt = 0u32;
        loop {
            match op().await {
                Ok(value) => return Ok(value),
                Err(e) => match delays.next() {
                    Some(delay) => {
                        attempt += 1;
                        tracing::warn!(
                            label,
                            error = %e,
                            retry = attempt,
                            of = retries,
                            delay_ms = delay.as_millis() as u64,
                            "Request failed, retrying"
                        );
                        tokio::time::sleep(delay).await;
                    }
                    None => return Err(e),
                },
            }
        }
    }

    /// Like [`RetryPolicy::run`], but swaps a final failure for `fallback`.
    pub async fn run_or<T, F, Fut>(&self, label: &str, fallback: T, op: F) -> T
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        match self.run(label, op).await {
            Ok(value) => value,
            Err(e) => {
                tracing::error!(label, error = %e, "All retries failed, using fallback");
                fallback
            }
        }
    }
}

fn grow(delay: Duration) -> Duration {
    Duration::try_from_secs_f64(delay.as_secs_f64() * BACKOFF_MULTIPLIER).unwrap_or(Duration::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn policy() -> RetryPolicy {
        RetryPolicy {
            attempts: 3,
            base_delay: Duration::from_millis(1),
        }
    }

    #[test]
    fn test_delays_grow_by_half() {
        let policy = RetryPolicy {
            attempts: 3,
            base_delay: Duration::from_millis(500),
        };
        assert_eq!(
            policy.delays().collect::<Vec<_>>(),
            vec![Duration::from_millis(500), Duration::from_millis(750)]
        );
    }

    #[test]
    fn test_delays_saturate_instead_of_overflowing() {
        let policy = RetryPolicy {
            attempts: 500,
            base_delay: Duration::from_millis(500),
        };
        assert_eq!(policy.delays().count(), 499);
        assert_eq!(policy.delays().last(), Some(Duration::MAX));
    }

    #[test]
    fn test_from_config_clamps_attempts() {
        let mut config = Config::test_default();
        config.retry_attempts = 0;
        assert_eq!(RetryPolicy::from_config(&config).attempts, 1);
        config.retry_attempts = u32::MAX;
        assert_eq!(RetryPolicy::from_config(&config).attempts, MAX_RETRY_ATTEMPTS);
    }

    #[tokio::test]
    async fn test_succeeds_after_transient_failures() {
        let counter = AtomicU32::new(0);
        let calls = &counter;
        let result = policy()
            .run("test", || async move {
                let n = calls.fetch_add(1, Ordering::SeqCst);
                if n < 2 {
                    Err(AppError::Network("flaky".to_string()))
                } else {
                    Ok(n)
                }
            })
            .await;

        assert_eq!(result.unwrap(), 2);
        assert_eq!(counter.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_fallback_after_exhausting_attempts() {
        let counter = AtomicU32::new(0);
        let calls = &counter;
        let value = policy()
            .run_or("test", 42, || async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Err::<u32, _>(AppError::Network("down".to_string()))
            })
            .await;

        assert_eq!(value, 42);
        assert_eq!(counter.load(Ordering::SeqCst), 3);
    }
}
