//! JSON payloads returned by the contents and blob endpoints.

use serde::Deserialize;

/// `type` field of a contents entry. `symlink` and `submodule` collapse into `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Dir,
    File,
    #[serde(other)]
    Other,
}

/// One entry of `GET /repos/{owner}/{repo}/contents/{path}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ContentEntry {
    #[serde(rename = "type")]
    pub kind: EntryKind,
    pub path: String,
    #[serde(default)]
    pub sha: String,
    #[serde(default)]
    pub size: u64,
    /// API URL of the entry itself (includes `?ref=`).
    #[serde(default)]
    pub url: Option<String>,
}

/// `GET /repos/{owner}/{repo}/git/blobs/{sha}`.
#[derive(Debug, Clone, Deserialize)]
pub struct BlobResponse {
    /// Base64 with embedded newlines.
    pub content: String,
    #[serde(default)]
    pub encoding: String,
}
