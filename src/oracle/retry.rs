//! Bounded retry with exponential backoff and jitter.

use std::future::Future;
use std::time::Duration;

use super::OracleError;

/// Runs `op` up to `attempts` times, backing off between attempts.
///
/// The delay before retry *n* is `base_delay * 2^(n-1)` (exponent capped at 5)
/// plus up to one second of uniform jitter, so concurrent callers do not
/// retry in lockstep. A [`OracleError::Fatal`] result is returned immediately
/// without further attempts.
pub async fn with_retries<T, F, Fut>(
    attempts: u32,
    base_delay: Duration,
    mut op: F,
) -> Result<T, OracleError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, OracleError>>,
{
    let attempts = attempts.max(1);
    let mut last_err = None;

    for attempt in 1..=attempts {
        if attempt > 1 {
            let backoff = base_delay * 2u32.pow((attempt - 2).min(5));
            let jitter = Duration::from_millis((rand::random::<f64>() * 1000.0) as u64);
            tokio::time::sleep(backoff + jitter).await;
        }

        match op().await {
            Ok(value) => return Ok(value),
            Err(OracleError::Fatal(msg)) => return Err(OracleError::Fatal(msg)),
            Err(err) => last_err = Some(err),
        }
    }

    Err(last_err.unwrap_or_else(|| OracleError::Retryable("no attempts were made".to_string())))
}
