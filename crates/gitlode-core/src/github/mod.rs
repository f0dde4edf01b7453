//! GitHub REST API access.
//!
//! The core only talks to GitHub through [`GitHubClient`], which owns a
//! [`Transport`] (libcurl in production, in-memory fakes in tests), the
//! endpoint builder for one repository, the optional token, and the retry
//! policy. No process-wide state is kept.

mod client;
mod curl_transport;
mod endpoints;
mod transport;
mod types;

pub use client::GitHubClient;
pub use curl_transport::CurlTransport;
pub use endpoints::ApiEndpoints;
pub use transport::{HttpResponse, Transport, TransportError, TransportErrorKind};
pub use types::{BlobResponse, ContentEntry, EntryKind};
