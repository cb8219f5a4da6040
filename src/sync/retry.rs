use crate::error::ApiError;
use anyhow::Result;
use std::thread::sleep;
use std::time::Duration;

/// A 4xx answer will not change on retry. Anything else, transport
/// failures included, gets another attempt.
fn is_retryable(error: &anyhow::Error) -> bool {
    error
        .chain()
        .find_map(|cause| cause.downcast_ref::<ApiError>())
        .is_none_or(ApiError::is_retryable)
}

/// Retry an operation with exponential backoff (100ms, 200ms, 400ms, ...)
///
/// Client errors (`ApiError` with a 4xx status) are returned after one attempt.
pub fn with_retry<F, T>(label: &str, operation: F, max_retries: u32) -> Result<T>
where
    F: Fn() -> Result<T>,
{
    let mut attempt = 0;
    loop {
        match operation() {
            Ok(result) => return Ok(result),
            Err(e) if attempt < max_retries && is_retryable(&e) => {
                let backoff_ms = 2_u64.pow(attempt) * 100;
                tracing::warn!(
                    "{} failed (attempt {}/{}): {:#}. Retrying in {}ms",
                    label,
                    attempt + 1,
                    max_retries + 1,
                    e,
                    backoff_ms
                );
                sleep(Duration::from_millis(backoff_ms));
                attempt += 1;
            }
            Err(e) => {
                return Err(e.context(format!(
                    "{} failed after {} attempts",
                    label,
                    attempt + 1
                )));
            }
        }
    }
}
