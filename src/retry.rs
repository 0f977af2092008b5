//! Retry with capped exponential backoff and jitter.
//!
//! Every failure is treated as retryable; the attempt cap is the only bound
//! on time spent per operation. Callers that need to distinguish permanent
//! failures must do so outside this module.

use std::future::Future;
use std::time::Duration;

use rand::Rng;
use tokio::time::sleep;

use crate::error::RetoqueError;
use crate::ui::BatchProgress;

/// Tunable parameters governing attempt count and backoff shape.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Maximum invocations of the operation, including the first (>= 1).
    pub max_attempts: u32,
    /// Delay before the first retry.
    pub base_delay: Duration,
    /// Cap applied to the pre-jitter delay.
    pub max_delay: Duration,
    /// Growth factor per attempt (> 1).
    pub multiplier: f64,
    /// Fraction of the delay added as uniform random jitter, in [0, 1).
    pub jitter_ratio: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 10,
            base_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(30),
            multiplier: 2.0,
            jitter_ratio: 0.1,
        }
    }
}

impl RetryPolicy {
    /// Pre-jitter delay for a 1-indexed attempt:
    /// `min(max_delay, base_delay * multiplier^(attempt - 1))`, so the first
    /// retry (after attempt 1 fails) sleeps the base delay.
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let base = self.base_delay.as_secs_f64();
        let max = self.max_delay.as_secs_f64();
        let exp = attempt.saturating_sub(1) as i32;
        Duration::from_secs_f64((base * self.multiplier.powi(exp)).min(max))
    }

    /// Delay for the attempt with uniform jitter in
    /// `[0, delay * jitter_ratio]` added on top.
    pub fn next_delay(&self, attempt: u32) -> Duration {
        let delay = self.delay_for_attempt(attempt);
        let cap = delay.as_secs_f64() * self.jitter_ratio;
        let jitter = if cap > 0.0 {
            rand::thread_rng().gen_range(0.0..=cap)
        } else {
            0.0
        };
        delay + Duration::from_secs_f64(jitter)
    }
}

/// Run `operation` until it succeeds or `policy.max_attempts` is reached.
///
/// On exhaustion the last error is wrapped in
/// [`RetoqueError::ExhaustedRetries`] together with the attempt count. Each
/// failed attempt short of the cap logs a warning through `progress` and
/// sleeps the computed backoff before trying again.
pub async fn run_with_retry<T, F, Fut>(
    mut operation: F,
    policy: &RetryPolicy,
    progress: &BatchProgress,
    description: &str,
) -> Result<T, RetoqueError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = anyhow::Result<T>>,
{
    let mut attempt: u32 = 1;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if attempt >= policy.max_attempts {
                    return Err(RetoqueError::ExhaustedRetries {
                        description: description.to_string(),
                        attempts: policy.max_attempts,
                        last_error: err,
                    });
                }
                let delay = policy.next_delay(attempt);
                progress.retry(
                    description,
                    attempt,
                    policy.max_attempts,
                    &err.to_string(),
                    delay,
                );
                sleep(delay).await;
                attempt += 1;
            }
        }
    }
}
