//! libcurl-backed transport.

use std::time::Duration;

use super::transport::{HttpResponse, Transport, TransportError, TransportErrorKind};
use crate::config::GitlodeConfig;

/// One curl easy handle per request. Follows redirects; connect and total
/// timeouts apply to every call.
#[derive(Debug, Clone, Copy)]
pub struct CurlTransport {
    pub connect_timeout: Duration,
    pub timeout: Duration,
}

impl Default for CurlTransport {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(15),
            timeout: Duration::from_secs(60),
        }
    }
}

impl CurlTransport {
    pub fn from_config(cfg: &GitlodeConfig) -> Self {
        Self {
            connect_timeout: Duration::from_secs(cfg.connect_timeout_secs),
            timeout: Duration::from_secs(cfg.request_timeout_secs),
        }
    }
}

impl From<curl::Error> for TransportError {
    fn from(e: curl::Error) -> Self {
        let kind = if e.is_operation_timedout() {
            TransportErrorKind::Timeout
        } else if e.is_couldnt_connect()
            || e.is_couldnt_resolve_host()
            || e.is_couldnt_resolve_proxy()
            || e.is_read_error()
            || e.is_recv_error()
            || e.is_send_error()
            || e.is_got_nothing()
        {
            TransportErrorKind::Connection
        } else {
            TransportErrorKind::Other
        };
        TransportError::new(kind, e.to_string())
    }
}

impl Transport for CurlTransport {
    fn get(&self, url: &str, headers: &[(String, String)]) -> Result<HttpResponse, TransportError> {
        let mut body = Vec::new();

        let mut easy = curl::easy::Easy::new();
        easy.url(url)?;
        easy.get(true)?;
        easy.follow_location(true)?;
        easy.connect_timeout(self.connect_timeout)?;
        easy.timeout(self.timeout)?;

        let mut list = curl::easy::List::new();
        for (k, v) in headers {
            list.append(&format!("{}: {}", k.trim(), v.trim()))?;
        }
        easy.http_headers(list)?;

        {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.perform()?;
        }

        let status = easy.response_code()?;
        Ok(HttpResponse { status, body })
    }
}
