//! Concurrent blob download into an archive.
//!
//! Fetches every file descriptor's blob, at most `max_concurrent` at a time
//! (refilling from the queue as tasks finish; `None` = all at once), writes
//! each result into the archive sink as soon as it settles, and reports
//! progress after every write. The first failure aborts the remaining tasks
//! and fails the whole download: an archive is returned only when every file
//! succeeded.

mod progress;

pub use progress::DownloadProgress;

use tokio::task::JoinSet;

use crate::archive::ArchiveSink;
use crate::error::{Error, Result};
use crate::fetch::fetch_blob;
use crate::github::{GitHubClient, TransportError, TransportErrorKind};
use crate::walker::FileDescriptor;

/// Path of a file inside the archive: `absolute_path` with the resolved
/// directory prefix removed. No stripping for the repository root.
pub fn archive_relative_path<'a>(absolute_path: &'a str, base_path: &str) -> &'a str {
    let base = base_path.trim_matches('/');
    if base.is_empty() {
        return absolute_path;
    }
    absolute_path
        .strip_prefix(base)
        .and_then(|rest| rest.strip_prefix('/'))
        .unwrap_or(absolute_path)
}

/// Downloads `files` into `sink` and returns it once every file is written.
///
/// `on_progress` runs after each successful write with the updated counts.
pub async fn download_files<S, P>(
    client: &GitHubClient,
    files: &[FileDescriptor],
    base_path: &str,
    mut sink: S,
    max_concurrent: Option<usize>,
    mut on_progress: P,
) -> Result<S>
where
    S: ArchiveSink,
    P: FnMut(DownloadProgress),
{
    let total = files.len();
    let limit = max_concurrent.unwrap_or(total).max(1);
    let mut progress = DownloadProgress::new(total);
    let mut queue = files.iter();
    let mut join_set = JoinSet::new();

    tracing::debug!(total, limit, "starting blob downloads");

    loop {
        while join_set.len() < limit {
            let Some(file) = queue.next() else {
                break;
            };
            let client = client.clone();
            let file = file.clone();
            join_set.spawn(async move {
                let content = fetch_blob(&client, &file.content_id).await;
                (file, content)
            });
        }

        let Some(joined) = join_set.join_next().await else {
            break;
        };
        let (file, content) = joined.map_err(|e| {
            TransportError::new(TransportErrorKind::Other, format!("fetch task: {}", e))
        })?;
        let content = match content {
            Ok(c) => c,
            Err(e) => {
                tracing::warn!(path = %file.absolute_path, "blob fetch failed: {}", e);
                join_set.abort_all();
                return Err(e);
            }
        };

        sink.add_file(archive_relative_path(&file.absolute_path, base_path), &content)?;
        progress.record_completed();
        on_progress(progress);
    }

    if sink.entry_count() < total {
        return Err(Error::Archive(format!(
            "only {} of {} files were written",
            sink.entry_count(),
            total
        )));
    }
    Ok(sink)
}
