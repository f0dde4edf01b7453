//! Error taxonomy for the export pipeline.
//!
//! Every variant is fail-fast: the pipeline stops at the first error. The
//! presentation layer shows [`Error::user_message`], which distinguishes the
//! rate-limit and not-found statuses from everything else.

use crate::github::TransportError;

/// Result alias used throughout the core crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

pub const RATE_LIMIT_MESSAGE: &str = "API rate limit exceeded. Please use a GitHub token.";
pub const NOT_FOUND_MESSAGE: &str = "Could not resolve branch from URL or directory not found.";

/// Why a resolved directory produced no files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectoryError {
    /// The contents listing for the resolved path returned 404.
    NotFound { path: String },
    /// The listing (recursively) contained no files.
    Empty { path: String },
    /// The path names a file; the contents API answered with an object, not a listing.
    NotADirectory { path: String },
}

impl std::fmt::Display for DirectoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let path = match self {
            DirectoryError::NotFound { path }
            | DirectoryError::Empty { path }
            | DirectoryError::NotADirectory { path } => path,
        };
        if path.is_empty() {
            write!(f, "directory is empty or not found: (root)")
        } else {
            write!(f, "directory is empty or not found: {}", path)
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Malformed or unsupported URL, or a URL without a `/tree/` segment.
    #[error("invalid GitHub URL: {0}")]
    Parse(String),

    /// No prefix of the ref-and-path names an existing branch.
    #[error("could not resolve a valid branch from {0:?}")]
    Resolution(String),

    #[error("{0}")]
    Directory(DirectoryError),

    /// A remote call answered with a non-success status.
    #[error("HTTP {status} from {url}")]
    Fetch { status: u32, url: String },

    /// No response was received (DNS, connect, timeout).
    #[error("transport: {0}")]
    Transport(#[from] TransportError),

    /// The response body was not the JSON or base64 payload we expected.
    #[error("decode: {0}")]
    Decode(String),

    #[error("archive: {0}")]
    Archive(String),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// HTTP status carried by a `Fetch` error.
    pub fn status(&self) -> Option<u32> {
        match self {
            Error::Fetch { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True for the status the branch resolver treats as "try a shorter prefix".
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Single human-readable line for the status display.
    pub fn user_message(&self) -> String {
        match self {
            Error::Fetch { status: 403 | 429, .. } => RATE_LIMIT_MESSAGE.to_string(),
            Error::Fetch { status: 404, .. } => NOT_FOUND_MESSAGE.to_string(),
            Error::Fetch { status, .. } => {
                format!("GitHub API request failed with HTTP {}.", status)
            }
            Error::Parse(_) => {
                "Invalid or incomplete GitHub URL. URL must contain \"/tree/\".".to_string()
            }
            Error::Resolution(_) => "Could not resolve a valid branch from the URL.".to_string(),
            Error::Directory(_) => "Directory is empty or not found.".to_string(),
            Error::Transport(e) => format!("Network error while contacting GitHub: {}", e),
            Error::Decode(_) | Error::Archive(_) | Error::Io(_) => self.to_string(),
        }
    }
}

impl From<zip::result::ZipError> for Error {
    fn from(e: zip::result::ZipError) -> Self {
        Error::Archive(e.to_string())
    }
}
