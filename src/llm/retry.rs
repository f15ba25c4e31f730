// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Opt-in retry for transient upstream failures
//!
//! The default policy makes a single attempt. With more attempts, delays grow
//! exponentially from the base delay with ±25% jitter.

use rand::Rng;
use std::future::Future;
use std::time::Duration;
use tracing::warn;

use super::errors::GatewayError;

/// Upper bound for a single backoff delay
const MAX_RETRY_DELAY_MS: u64 = 10_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::single_attempt()
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
        }
    }

    pub fn single_attempt() -> Self {
        Self::new(1, Duration::from_millis(250))
    }

    /// Backoff before retry number `attempt` (1-based)
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let exp = self
            .base_delay
            .as_millis()
            .saturating_mul(1u128 << attempt.saturating_sub(1).min(16))
            .min(MAX_RETRY_DELAY_MS as u128) as u64;
        let jitter_range = exp / 4;
        if jitter_range == 0 {
            return Duration::from_millis(exp);
        }
        let jittered = rand::thread_rng().gen_range(exp - jitter_range..=exp + jitter_range);
        Duration::from_millis(jittered)
    }

    /// Runs `op` until it succeeds, fails with a non-retryable error, or the
    /// attempts are exhausted
    pub async fn run<T, F, Fut>(&self, mut op: F) -> Result<T, GatewayError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, GatewayError>>,
    {
        let mut attempt = 1;
        loop {
            match op().await {
                Err(err) if err.is_retryable() && attempt < self.max_attempts => {
                    let delay = self.delay_for(attempt);
                    warn!(
                        "Attempt {}/{} failed ({}), retrying in {}ms",
                        attempt,
                        self.max_attempts,
                        err,
                        delay.as_millis()
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                result => return result,
            }
        }
    }
}
