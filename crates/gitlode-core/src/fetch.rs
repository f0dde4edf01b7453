//! Blob content retrieval.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};

use crate::error::{Error, Result};
use crate::github::GitHubClient;

/// Fetches the blob `content_id` and returns its raw bytes.
pub async fn fetch_blob(client: &GitHubClient, content_id: &str) -> Result<Vec<u8>> {
    let blob = client.get_blob(content_id).await?;
    if !blob.encoding.is_empty() && blob.encoding != "base64" {
        return Err(Error::Decode(format!(
            "blob {} has unsupported encoding {:?}",
            content_id, blob.encoding
        )));
    }
    decode_blob_content(&blob.content)
        .map_err(|e| Error::Decode(format!("blob {}: {}", content_id, e)))
}

/// Decodes base64 that may contain line breaks or other whitespace.
pub fn decode_blob_content(content: &str) -> Result<Vec<u8>, base64::DecodeError> {
    let compact: String = content.chars().filter(|c| !c.is_whitespace()).collect();
    BASE64.decode(compact)
}
