//! Retry and backoff for GitHub API calls.
//!
//! Classifies errors (timeouts, throttling, connection failures, 5xx) and
//! makes exponential backoff decisions so every remote call shares one policy.
//! 404 and 403 are never retried: the first drives branch resolution, the
//! second is a rate-limit or permission verdict that waiting briefly won't fix.

mod classify;
mod policy;
mod run;

pub use classify::{classify, classify_http_status};
pub use policy::{ErrorKind, RetryDecision, RetryPolicy};
pub use run::retry_async;
