//! Bounded exponential-backoff retry for model calls.
//!
//! Only the overloaded classification (HTTP 503 from the model endpoint) is
//! retried; everything else propagates on the first failure. The wait before
//! retry `n` is `initial_delay * 2^n` plus up to one second of uniform jitter
//! so that concurrent callers do not re-hit the endpoint in lockstep.

use std::future::Future;
use std::time::Duration;

use rand::Rng;
use tokio::time::sleep;
use tracing::warn;

use crate::error::ModelError;

pub const MAX_ATTEMPTS: u32 = 5;
pub const INITIAL_DELAY: Duration = Duration::from_secs(1);

/// Invoke `operation` until it succeeds, fails with a non-retryable error,
/// or `max_attempts` invocations have been made. The last error propagates
/// on exhaustion.
///
/// `max_attempts` must be at least 1; zero attempts is a caller bug.
pub async fn retry_with_backoff<T, F, Fut>(
    mut operation: F,
    max_attempts: u32,
    initial_delay: Duration,
) -> Result<T, ModelError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ModelError>>,
{
    debug_assert!(max_attempts >= 1, "retry requires at least one attempt");

    let mut attempt: u32 = 0;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) if err.is_retryable() && attempt + 1 < max_attempts => {
                let jitter = rand::thread_rng().gen_range(0.0..1.0);
                let delay = initial_delay.mul_f64(f64::from(2u32.pow(attempt)))
                    + Duration::from_secs_f64(jitter);
                warn!(
                    attempt = attempt + 1,
                    max_attempts,
                    delay_ms = delay.as_millis() as u64,
                    "model endpoint overloaded, backing off"
                );
                sleep(delay).await;
                attempt += 1;
            }
            Err(err) => return Err(err),
        }
    }
}
