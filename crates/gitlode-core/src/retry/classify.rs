//! Map HTTP statuses and transport failures to retry kinds.

use crate::error::Error;
use crate::github::TransportErrorKind;
use crate::retry::policy::ErrorKind;

/// Classify an HTTP status code.
pub fn classify_http_status(code: u32) -> ErrorKind {
    match code {
        429 => ErrorKind::Throttled,
        500..=599 => ErrorKind::Http5xx(code as u16),
        _ => ErrorKind::Permanent,
    }
}

/// Classify a pipeline error. Only fetch and transport failures can be transient.
pub fn classify(e: &Error) -> ErrorKind {
    match e {
        Error::Fetch { status, .. } => classify_http_status(*status),
        Error::Transport(t) => match t.kind() {
            TransportErrorKind::Timeout => ErrorKind::Timeout,
            TransportErrorKind::Connection => ErrorKind::Connection,
            TransportErrorKind::Other => ErrorKind::Permanent,
        },
        _ => ErrorKind::Permanent,
    }
}
