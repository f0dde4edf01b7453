//! End-to-end export: URL → branch/path → file list → display tree → zip.
//!
//! Each call builds its own client and state; nothing is shared between
//! concurrent exports except the transport.

mod events;

pub use events::{EventSink, LogLevel, LogLine, PipelineEvent};

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::archive::ZipArchiveWriter;
use crate::config::GitlodeConfig;
use crate::downloader::{download_files, DownloadProgress};
use crate::error::{Error, Result};
use crate::github::{ApiEndpoints, CurlTransport, GitHubClient, Transport};
use crate::locator::{archive_file_name, parse_locator, RepoLocator, ResolvedLocation};
use crate::resolver::resolve_branch_and_path;
use crate::tree_view::{build_display_tree, DisplayNode};
use crate::walker::{list_directory_files, FileDescriptor};

/// A resolved and listed directory, ready to display or download.
#[derive(Debug, Clone)]
pub struct DirectoryListing {
    pub locator: RepoLocator,
    pub location: ResolvedLocation,
    pub files: Vec<FileDescriptor>,
    pub tree: Vec<DisplayNode>,
}

/// Outcome of a successful export.
#[derive(Debug, Clone)]
pub struct ExportSummary {
    pub archive_path: PathBuf,
    pub file_count: usize,
    pub branch: String,
    pub path: String,
}

pub struct Exporter {
    cfg: GitlodeConfig,
    transport: Arc<dyn Transport>,
}

impl Exporter {
    /// Exporter over libcurl, configured from `cfg`.
    pub fn new(cfg: GitlodeConfig) -> Self {
        let transport = Arc::new(CurlTransport::from_config(&cfg));
        Self { cfg, transport }
    }

    pub fn with_transport(cfg: GitlodeConfig, transport: Arc<dyn Transport>) -> Self {
        Self { cfg, transport }
    }

    fn client(&self, locator: &RepoLocator, token: Option<String>) -> Result<GitHubClient> {
        let endpoints = ApiEndpoints::new(&self.cfg.api_base_url, &locator.owner, &locator.repo_name)?;
        Ok(GitHubClient::new(Arc::clone(&self.transport), endpoints)
            .with_token(token)
            .with_user_agent(&self.cfg.user_agent)
            .with_retry_policy(self.cfg.retry_policy()))
    }

    /// Resolves and lists `url` without downloading anything.
    pub async fn list(
        &self,
        url: &str,
        token: Option<String>,
        events: &EventSink,
    ) -> Result<DirectoryListing> {
        events.status("");
        events.progress(DownloadProgress::default());
        let result = self.list_inner(url, token, events).await.map(|(listing, _)| listing);
        if let Err(e) = &result {
            report_failure(events, e);
        }
        result
    }

    /// Resolves, lists, downloads, and writes `<output_dir>/<repo>-<ref_and_path>.zip`.
    pub async fn export(
        &self,
        url: &str,
        token: Option<String>,
        output_dir: &Path,
        events: &EventSink,
    ) -> Result<ExportSummary> {
        events.status("");
        events.progress(DownloadProgress::default());
        events.info("Download process started...");
        let result = self.export_inner(url, token, output_dir, events).await;
        if let Err(e) = &result {
            report_failure(events, e);
        }
        result
    }

    async fn list_inner(
        &self,
        url: &str,
        token: Option<String>,
        events: &EventSink,
    ) -> Result<(DirectoryListing, GitHubClient)> {
        let locator = parse_locator(url, &self.cfg.web_host)
            .ok_or_else(|| Error::Parse(url.to_string()))?;
        let Some(ref_and_path) = locator.ref_and_path.clone() else {
            return Err(Error::Parse(url.to_string()));
        };
        tracing::debug!(owner = %locator.owner, repo = %locator.repo_name, %ref_and_path, "parsed locator");
        events.info(format!(
            "Parsed URL for owner \"{}\" and repo \"{}\".",
            locator.owner, locator.repo_name
        ));
        events.info(format!(
            "Attempting to resolve branch and path from: \"{}\"...",
            ref_and_path
        ));

        let client = self.client(&locator, token)?;
        let location = resolve_branch_and_path(&client, &ref_and_path).await?;
        events.success(format!("Resolved branch: \"{}\"", location.branch));
        events.success(format!("Resolved path: \"{}\"", location.display_path()));

        events.info("Fetching file list from repository...");
        let files = list_directory_files(&client, &location).await?;
        events.success(format!("Found {} files. Building file tree...", files.len()));

        let tree = build_display_tree(&files, &location.path);
        events.tree(tree.clone());

        Ok((
            DirectoryListing {
                locator,
                location,
                files,
                tree,
            },
            client,
        ))
    }

    async fn export_inner(
        &self,
        url: &str,
        token: Option<String>,
        output_dir: &Path,
        events: &EventSink,
    ) -> Result<ExportSummary> {
        let (listing, client) = self.list_inner(url, token, events).await?;
        let total = listing.files.len();

        std::fs::create_dir_all(output_dir)?;
        let archive_path = output_dir.join(archive_file_name(&listing.locator));
        let writer = ZipArchiveWriter::create(&archive_path)?;

        let writer = download_files(
            &client,
            &listing.files,
            &listing.location.path,
            writer,
            self.cfg.max_concurrent_fetches,
            |progress| {
                events.status(format!(
                    "Downloading file {}/{}...",
                    progress.completed_count, progress.total_count
                ));
                events.progress(progress);
            },
        )
        .await?;

        events.info("Generating ZIP file...");
        events.status("Generating ZIP file...");
        let archive_path = writer.finish()?;

        events.success("Download complete!");
        events.status(format!("Saved {}", archive_path.display()));

        Ok(ExportSummary {
            archive_path,
            file_count: total,
            branch: listing.location.branch,
            path: listing.location.path,
        })
    }
}

fn report_failure(events: &EventSink, e: &Error) {
    tracing::debug!(status = ?e.status(), "export failed: {}", e);
    events.error(e.user_message());
    events.status("");
    events.progress(DownloadProgress::default());
}
