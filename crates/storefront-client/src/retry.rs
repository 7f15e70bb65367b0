//! Retry with exponential back-off and jitter for catalog API requests.
//!
//! [`retry_with_backoff`] wraps a fallible async request and retries it on
//! transient failures only. With `max_retries = 0` (the default
//! configuration) the request runs exactly once.

use std::future::Future;
use std::time::Duration;

use crate::error::ClientError;

const MAX_DELAY_MS: u64 = 30_000;

/// Returns `true` for errors that are worth retrying after a back-off delay.
///
/// **Retriable:** HTTP 429, HTTP 5xx, connect failures and timeouts.
///
/// **Not retriable:** API error payloads, 404 and other 4xx statuses,
/// malformed bodies, and invalid base URLs. Retrying would return the same
/// answer.
pub(crate) fn is_retriable(err: &ClientError) -> bool {
    match err {
        ClientError::RateLimited { .. } => true,
        ClientError::UnexpectedStatus { status, .. } => *status >= 500,
        ClientError::Http(e) => e.is_timeout() || e.is_connect(),
        ClientError::Api(_)
        | ClientError::Deserialize { .. }
        | ClientError::NotFound { .. }
        | ClientError::InvalidBaseUrl { .. } => false,
    }
}

/// Back-off before retry number `attempt` (1-based), before jitter.
fn backoff_delay_ms(backoff_base_ms: u64, attempt: u32) -> u64 {
    backoff_base_ms
        .saturating_mul(1u64 << attempt.saturating_sub(1).min(20))
        .min(MAX_DELAY_MS)
}

/// Runs `operation` with up to `max_retries` additional attempts on transient errors.
///
/// Back-off schedule with `backoff_base_ms = 500`:
///
/// | Retry | Sleep before it             |
/// |-------|-----------------------------|
/// | 1     | 500 ms × 2⁰ ± 25 % jitter  |
/// | 2     | 500 ms × 2¹ ± 25 % jitter  |
/// | 3     | 500 ms × 2² ± 25 % jitter  |
///
/// Delay is capped at 30 s. Non-retriable errors are returned immediately.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_ms: u64,
    mut operation: F,
) -> Result<T, ClientError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ClientError>>,
{
    let mut attempt = 0u32;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if !is_retriable(&err) || attempt >= max_retries {
                    return Err(err);
                }
                attempt += 1;
                let capped = backoff_delay_ms(backoff_base_ms, attempt);
                #[allow(
                    clippy::cast_possible_truncation,
                    clippy::cast_sign_loss,
                    clippy::cast_precision_loss
                )]
                let delay_ms = (capped as f64 * (rand::random::<f64>() * 0.5 + 0.75)) as u64;
                tracing::warn!(
                    attempt,
                    max_retries,
                    delay_ms,
                    error = %err,
                    "catalog API transient error, retrying after back-off"
                );
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    use super::*;

    fn server_error() -> ClientError {
        ClientError::UnexpectedStatus {
            status: 503,
            url: "http://localhost/products/".to_owned(),
        }
    }

    #[test]
    fn classifies_errors() {
        assert!(is_retriable(&ClientError::RateLimited {
            retry_after_secs: 1
        }));
        assert!(is_retriable(&server_error()));
        assert!(!is_retriable(&ClientError::UnexpectedStatus {
            status: 403,
            url: String::new(),
        }));
        assert!(!is_retriable(&ClientError::Api("bad".to_owned())));
        assert!(!is_retriable(&ClientError::NotFound { url: String::new() }));
    }

    #[test]
    fn backoff_doubles_and_caps() {
        assert_eq!(backoff_delay_ms(500, 1), 500);
        assert_eq!(backoff_delay_ms(500, 2), 1_000);
        assert_eq!(backoff_delay_ms(500, 3), 2_000);
        assert_eq!(backoff_delay_ms(500, 40), MAX_DELAY_MS);
        assert_eq!(backoff_delay_ms(u64::MAX, 5), MAX_DELAY_MS);
    }

    #[tokio::test]
    async fn zero_retries_runs_once() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = retry_with_backoff(0, 0, || {
            let c = Arc::clone(&c);
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                Err::<u32, ClientError>(server_error())
            }
        })
        .await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(matches!(
            result,
            Err(ClientError::UnexpectedStatus { status: 503, .. })
        ));
    }

    #[tokio::test]
    async fn retries_transient_then_succeeds() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = retry_with_backoff(3, 0, || {
            let c = Arc::clone(&c);
            async move {
                if c.fetch_add(1, Ordering::SeqCst) < 2 {
                    Err(server_error())
                } else {
                    Ok::<u32, ClientError>(7)
                }
            }
        })
        .await;
        assert_eq!(result.unwrap(), 7);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn does_not_retry_api_error() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = retry_with_backoff(3, 0, || {
            let c = Arc::clone(&c);
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                Err::<u32, ClientError>(ClientError::Api("nope".to_owned()))
            }
        })
        .await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(matches!(result, Err(ClientError::Api(_))));
    }

    #[tokio::test]
    async fn gives_up_after_max_retries() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = retry_with_backoff(2, 0, || {
            let c = Arc::clone(&c);
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                Err::<u32, ClientError>(ClientError::RateLimited {
                    retry_after_secs: 0,
                })
            }
        })
        .await;
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert!(matches!(result, Err(ClientError::RateLimited { .. })));
    }
}
