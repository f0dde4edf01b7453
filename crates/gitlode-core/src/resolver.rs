//! Branch/path disambiguation for ref-and-path strings.
//!
//! Branch names may contain `/`, so `feature/login/src` could be branch
//! `feature/login` with path `src`, or branch `feature` with path
//! `login/src`. The GitHub API can only answer "does this branch exist", so
//! we probe candidates from the longest prefix down and stop at the first hit.
//! Probes are sequential: the longest match must win.

use crate::error::{Error, Result};
use crate::github::GitHubClient;
use crate::locator::ResolvedLocation;

/// Resolves `ref_and_path` into a confirmed branch and remaining directory path.
///
/// A 404 probe drops one trailing segment and tries again; any other failure
/// (403, exhausted retries, transport) aborts immediately. Makes at most `n`
/// probes for an `n`-segment input and fails with `Error::Resolution` when
/// none match.
pub async fn resolve_branch_and_path(
    client: &GitHubClient,
    ref_and_path: &str,
) -> Result<ResolvedLocation> {
    let parts: Vec<&str> = ref_and_path.split('/').filter(|s| !s.is_empty()).collect();
    if parts.is_empty() {
        return Err(Error::Resolution(ref_and_path.to_string()));
    }

    for len in (1..=parts.len()).rev() {
        let candidate = parts[..len].join("/");
        tracing::debug!(
            owner = client.endpoints().owner(),
            repo = client.endpoints().repo(),
            %candidate,
            "probing branch"
        );
        if client.branch_exists(&candidate).await? {
            let path = parts[len..].join("/");
            tracing::info!(branch = %candidate, %path, "resolved branch");
            return Ok(ResolvedLocation {
                branch: candidate,
                path,
            });
        }
    }

    Err(Error::Resolution(ref_and_path.to_string()))
}
