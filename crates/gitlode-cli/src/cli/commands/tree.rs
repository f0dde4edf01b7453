//! `gitlode tree <url>` – print the file tree of a repository directory.

use anyhow::Result;
use gitlode_core::config::GitlodeConfig;
use gitlode_core::pipeline::{EventSink, Exporter};
use tokio::sync::mpsc;

use super::render::print_events;

pub async fn run_tree(cfg: GitlodeConfig, url: &str, token: Option<String>) -> Result<()> {
    let (tx, rx) = mpsc::unbounded_channel();
    let printer = tokio::spawn(print_events(rx));

    let exporter = Exporter::new(cfg);
    let result = exporter.list(url, token, &EventSink::new(tx)).await;
    printer.await?;

    let listing = result?;
    let total: u64 = listing.files.iter().map(|f| f.size_bytes).sum();
    println!(
        "{} file(s), {} on branch {}",
        listing.files.len(),
        gitlode_core::tree_view::format_bytes(total),
        listing.location.branch
    );
    Ok(())
}
