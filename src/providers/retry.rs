// Retry logic with exponential backoff and jitter
//
// Only transient failures (rate limit, overload, network) are retried;
// everything else re-raises immediately. Shared by both provider clients.

use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;

use rand::Rng;

use super::error::ProviderError;

/// Default attempt ceiling for the cloud client.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

const BASE_DELAY_MS: u64 = 1000;
const MAX_JITTER_MS: u64 = 1000;

/// Execute an operation with the default attempt ceiling.
pub async fn with_retry<F, Fut, T>(f: F) -> Result<T, ProviderError>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<T, ProviderError>>,
{
    with_retry_attempts(f, DEFAULT_MAX_ATTEMPTS).await
}

/// Execute an operation, retrying transient failures up to `max_attempts`
/// total attempts with exponentially increasing, jittered delays.
///
/// A non-transient failure is returned immediately without retrying, as is
/// the last error once attempts are exhausted.
pub async fn with_retry_attempts<F, Fut, T>(f: F, max_attempts: u32) -> Result<T, ProviderError>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<T, ProviderError>>,
{
    let max_attempts = max_attempts.max(1);
    let mut attempt = 0;

    loop {
        match f().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                attempt += 1;
                if !err.is_transient() || attempt >= max_attempts {
                    return Err(err);
                }

                let delay = backoff_delay(attempt - 1);
                tracing::warn!(
                    "Request failed (attempt {}/{}), retrying in {:?}: {}",
                    attempt,
                    max_attempts,
                    delay,
                    err
                );
                sleep(delay).await;
            }
        }
    }
}

/// Delay before the retry that follows failed attempt number `attempt`
/// (zero-based): 2^attempt seconds plus up to one second of jitter.
///
/// The jitter term keeps concurrently failing callers from retrying in
/// lockstep against an already struggling service.
fn backoff_delay(attempt: u32) -> Duration {
    let base_ms = BASE_DELAY_MS * 2u64.pow(attempt);
    let jitter_ms = rand::thread_rng().gen_range(0..MAX_JITTER_MS);
    Duration::from_millis(base_ms + jitter_ms)
}
