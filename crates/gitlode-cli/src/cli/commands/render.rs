//! Terminal rendering of pipeline events.

use gitlode_core::downloader::DownloadProgress;
use gitlode_core::pipeline::{LogLevel, LogLine, PipelineEvent};
use gitlode_core::tree_view::{DisplayNode, NodeKind};
use std::io::Write;
use tokio::sync::mpsc::UnboundedReceiver;

/// `[HH:MM:SS] message`, with a level tag for successes and errors.
pub(crate) fn format_log_line(line: &LogLine) -> String {
    let tag = match line.level {
        LogLevel::Info => "",
        LogLevel::Success => "ok: ",
        LogLevel::Error => "error: ",
    };
    format!("[{}] {}{}", line.at.format("%H:%M:%S"), tag, line.message)
}

/// One line per node, indented two spaces per level. Folders end in `/`.
pub(crate) fn tree_lines(nodes: &[DisplayNode]) -> Vec<String> {
    nodes
        .iter()
        .map(|node| {
            let indent = "  ".repeat(node.depth);
            match node.kind {
                NodeKind::Folder => format!("{}{}/", indent, node.name),
                NodeKind::File => format!("{}{} ({})", indent, node.name, node.formatted_size()),
            }
        })
        .collect()
}

/// Text of the single status line: the pipeline status plus download percentage.
pub(crate) fn status_line(status: &str, progress: &DownloadProgress) -> String {
    match (status.is_empty(), progress.total_count > 0) {
        (true, false) => String::new(),
        (false, false) => status.to_string(),
        (false, true) => format!("{} ({:.0}%)", status, progress.percent()),
        (true, true) => format!(
            "{}/{} files ({:.0}%)",
            progress.completed_count,
            progress.total_count,
            progress.percent()
        ),
    }
}

/// Prints events until every sender is dropped. Status and progress share one
/// stderr line that is redrawn in place.
pub(crate) async fn print_events(mut rx: UnboundedReceiver<PipelineEvent>) {
    let mut status = String::new();
    let mut progress = DownloadProgress::default();
    let mut drawn = 0usize;

    while let Some(event) = rx.recv().await {
        match event {
            PipelineEvent::Log(line) => {
                if drawn > 0 {
                    eprintln!();
                    drawn = 0;
                }
                println!("{}", format_log_line(&line));
                continue;
            }
            PipelineEvent::Tree(nodes) => {
                for line in tree_lines(&nodes) {
                    println!("{}", line);
                }
                continue;
            }
            PipelineEvent::Status(s) => status = s,
            PipelineEvent::Progress(p) => progress = p,
        }

        let line = status_line(&status, &progress);
        if line.is_empty() {
            if drawn > 0 {
                eprintln!();
                drawn = 0;
            }
            continue;
        }
        // Pad over the remains of a longer previous line.
        eprint!("\r{:<width$}", line, width = drawn);
        let _ = std::io::stderr().flush();
        drawn = drawn.max(line.chars().count());
    }
    if drawn > 0 {
        eprintln!();
    }
}
