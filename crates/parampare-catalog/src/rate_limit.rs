//! Retry with exponential backoff for catalog API calls.
//!
//! Only transient failures are retried: HTTP 429 and transport errors.
//! Anything the server answered definitively (404, 403, other statuses, an
//! unparseable body) is returned on the first attempt.

use std::future::Future;
use std::time::Duration;

use crate::error::CatalogError;

fn is_retriable(err: &CatalogError) -> bool {
    matches!(err, CatalogError::RateLimited { .. } | CatalogError::Http(_))
}

/// Runs `operation`, retrying transient errors up to `max_retries` times.
///
/// The wait before retry `n` (starting at 0) is `backoff_base_secs * 2^n`
/// seconds, so `max_retries = 2` with a base of 1 tries three times and
/// sleeps 1 s then 2 s. The last error is returned once retries run out.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_secs: u64,
    mut operation: F,
) -> Result<T, CatalogError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, CatalogError>>,
{
    let mut attempt = 0u32;

    loop {
        let err = match operation().await {
            Ok(value) => return Ok(value),
            Err(err) if !is_retriable(&err) || attempt >= max_retries => return Err(err),
            Err(err) => err,
        };

        let delay_secs = backoff_base_secs.saturating_mul(1u64 << attempt.min(62));
        tracing::warn!(
            attempt,
            max_retries,
            delay_secs,
            error = %err,
            "transient catalog error, retrying after backoff"
        );
        tokio::time::sleep(Duration::from_secs(delay_secs)).await;
        attempt += 1;
    }
}
