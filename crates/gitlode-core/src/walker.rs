//! Recursive directory enumeration over the contents API.
//!
//! One listing call per directory; sibling subdirectories are walked
//! concurrently and joined with `try_join_all` before the level returns, so
//! the result is the union of all levels. Order is not meaningful.

use futures::future::{try_join_all, BoxFuture, FutureExt};

use crate::error::{DirectoryError, Error, Result};
use crate::github::{ContentEntry, EntryKind, GitHubClient};
use crate::locator::ResolvedLocation;

/// A file found under the resolved directory. `content_id` is the blob SHA.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FileDescriptor {
    /// Path from the repository root, not from the requested directory.
    pub absolute_path: String,
    pub content_id: String,
    pub size_bytes: u64,
}

/// Lists every file under `location`, recursively.
///
/// A 404 or a non-listing payload on the top-level call, and an empty result,
/// are all reported as `Error::Directory`; callers show them identically.
/// Failures in nested listings propagate unchanged.
pub async fn list_directory_files(
    client: &GitHubClient,
    location: &ResolvedLocation,
) -> Result<Vec<FileDescriptor>> {
    let url = client.endpoints().contents(&location.path, &location.branch);
    let path = location.path.clone();
    let entries = match client.list_contents(&url).await {
        Ok(entries) => entries,
        Err(e) if e.is_not_found() => {
            return Err(Error::Directory(DirectoryError::NotFound { path }))
        }
        Err(Error::Decode(reason)) => {
            tracing::debug!(%path, "top-level listing is not a directory: {}", reason);
            return Err(Error::Directory(DirectoryError::NotADirectory { path }));
        }
        Err(e) => return Err(e),
    };

    let files = collect(client, entries, &location.branch).await?;
    if files.is_empty() {
        return Err(Error::Directory(DirectoryError::Empty { path }));
    }
    tracing::debug!(count = files.len(), path = %location.path, "directory listed");
    Ok(files)
}

fn walk<'a>(
    client: &'a GitHubClient,
    url: String,
    branch: &'a str,
) -> BoxFuture<'a, Result<Vec<FileDescriptor>>> {
    async move {
        let entries = client.list_contents(&url).await?;
        collect(client, entries, branch).await
    }
    .boxed()
}

/// Files of one level plus everything under its subdirectories.
async fn collect(
    client: &GitHubClient,
    entries: Vec<ContentEntry>,
    branch: &str,
) -> Result<Vec<FileDescriptor>> {
    let mut files = Vec::new();
    let mut subdirs = Vec::new();
    for entry in entries {
        match entry.kind {
            EntryKind::File => files.push(FileDescriptor {
                absolute_path: entry.path,
                content_id: entry.sha,
                size_bytes: entry.size,
            }),
            EntryKind::Dir => {
                let dir_url = entry
                    .url
                    .unwrap_or_else(|| client.endpoints().contents(&entry.path, branch));
                subdirs.push(walk(client, dir_url, branch));
            }
            EntryKind::Other => {
                tracing::trace!(path = %entry.path, "skipping non-file entry");
            }
        }
    }

    for nested in try_join_all(subdirs).await? {
        files.extend(nested);
    }
    Ok(files)
}
