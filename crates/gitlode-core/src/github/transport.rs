//! Blocking HTTP transport seam.

/// Status and body of a completed request. Non-2xx statuses are still `Ok` here;
/// the client decides what they mean.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u32,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Coarse kind of a transport failure, used for retry classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportErrorKind {
    Timeout,
    Connection,
    Other,
}

/// No response was received.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{message}")]
pub struct TransportError {
    kind: TransportErrorKind,
    message: String,
}

impl TransportError {
    pub fn new(kind: TransportErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn kind(&self) -> TransportErrorKind {
        self.kind
    }
}

/// Performs one GET. Implementations block the calling thread; the client runs
/// them on the tokio blocking pool.
pub trait Transport: Send + Sync + 'static {
    fn get(&self, url: &str, headers: &[(String, String)]) -> Result<HttpResponse, TransportError>;
}
