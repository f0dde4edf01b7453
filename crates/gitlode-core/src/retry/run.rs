//! Async retry loop: run an operation until success or the policy says stop.

use std::future::Future;

use super::classify;
use super::policy::{RetryDecision, RetryPolicy};
use crate::error::Error;

/// Runs `op` until it succeeds or `policy` stops retrying; backs off with `tokio::time::sleep`.
/// `label` is only used for logging.
pub async fn retry_async<T, F, Fut>(policy: &RetryPolicy, label: &str, mut op: F) -> Result<T, Error>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, Error>>,
{
    let mut attempt = 1u32;
    loop {
        match op().await {
            Ok(v) => return Ok(v),
            Err(e) => match policy.decide(attempt, classify::classify(&e)) {
                RetryDecision::NoRetry => return Err(e),
                RetryDecision::RetryAfter(delay) => {
                    tracing::warn!(attempt, ?delay, "{} failed: {}; retrying", label, e);
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
            },
        }
    }
}
