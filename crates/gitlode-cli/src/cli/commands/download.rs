//! `gitlode download <url>` – resolve, fetch, and zip a repository directory.

use anyhow::Result;
use gitlode_core::config::GitlodeConfig;
use gitlode_core::pipeline::{EventSink, Exporter};
use std::path::Path;
use tokio::sync::mpsc;

use super::render::print_events;

pub async fn run_download(
    cfg: GitlodeConfig,
    url: &str,
    token: Option<String>,
    output_dir: &Path,
) -> Result<()> {
    let (tx, rx) = mpsc::unbounded_channel();
    let printer = tokio::spawn(print_events(rx));

    let exporter = Exporter::new(cfg);
    let result = exporter
        .export(url, token, output_dir, &EventSink::new(tx))
        .await;
    // The sink is gone, so the printer drains and exits.
    printer.await?;

    let summary = result?;
    println!(
        "Saved {} file(s) from branch {} to {}",
        summary.file_count,
        summary.branch,
        summary.archive_path.display()
    );
    Ok(())
}
