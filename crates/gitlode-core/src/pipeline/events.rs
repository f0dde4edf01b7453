//! Events published to the presentation layer while an export runs.

use chrono::{DateTime, Local};
use tokio::sync::mpsc::UnboundedSender;

use crate::downloader::DownloadProgress;
use crate::tree_view::DisplayNode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Success,
    Error,
}

/// One line of the append-only, timestamped log.
#[derive(Debug, Clone)]
pub struct LogLine {
    pub at: DateTime<Local>,
    pub level: LogLevel,
    pub message: String,
}

#[derive(Debug, Clone)]
pub enum PipelineEvent {
    Log(LogLine),
    /// Replaces the single status line; empty clears it.
    Status(String),
    /// Display rows, published once the file list is known.
    Tree(Vec<DisplayNode>),
    Progress(DownloadProgress),
}

/// Publishes events when a receiver is attached; a dropped receiver is ignored.
/// Log lines are mirrored to `tracing`.
#[derive(Debug, Clone, Default)]
pub struct EventSink {
    tx: Option<UnboundedSender<PipelineEvent>>,
}

impl EventSink {
    pub fn new(tx: UnboundedSender<PipelineEvent>) -> Self {
        Self { tx: Some(tx) }
    }

    /// Sink that drops everything (logs still reach `tracing`).
    pub fn silent() -> Self {
        Self::default()
    }

    fn send(&self, event: PipelineEvent) {
        if let Some(tx) = &self.tx {
            let _ = tx.send(event);
        }
    }

    fn log(&self, level: LogLevel, message: String) {
        match level {
            LogLevel::Error => tracing::error!("{}", message),
            LogLevel::Info | LogLevel::Success => tracing::info!("{}", message),
        }
        self.send(PipelineEvent::Log(LogLine {
            at: Local::now(),
            level,
            message,
        }));
    }

    pub fn info(&self, message: impl Into<String>) {
        self.log(LogLevel::Info, message.into());
    }

    pub fn success(&self, message: impl Into<String>) {
        self.log(LogLevel::Success, message.into());
    }

    pub fn error(&self, message: impl Into<String>) {
        self.log(LogLevel::Error, message.into());
    }

    pub fn status(&self, message: impl Into<String>) {
        self.send(PipelineEvent::Status(message.into()));
    }

    pub fn tree(&self, nodes: Vec<DisplayNode>) {
        self.send(PipelineEvent::Tree(nodes));
    }

    pub fn progress(&self, progress: DownloadProgress) {
        self.send(PipelineEvent::Progress(progress));
    }
}
