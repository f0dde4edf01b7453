//! Zip output through a `.part` temp file.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use super::{temp_path, ArchiveSink};
use crate::error::{Error, Result};

pub struct ZipArchiveWriter {
    zip: Option<ZipWriter<File>>,
    temp_path: PathBuf,
    final_path: PathBuf,
    entries: usize,
}

impl ZipArchiveWriter {
    /// Creates (truncating) `<final_path>.part`. Nothing appears at `final_path` until `finish`.
    pub fn create(final_path: &Path) -> Result<Self> {
        let temp_path = temp_path(final_path);
        let file = File::create(&temp_path)?;
        Ok(Self {
            zip: Some(ZipWriter::new(file)),
            temp_path,
            final_path: final_path.to_path_buf(),
            entries: 0,
        })
    }

    /// Writes the central directory, syncs, and renames the temp file into place.
    pub fn finish(mut self) -> Result<PathBuf> {
        let zip = self
            .zip
            .take()
            .ok_or_else(|| Error::Archive("archive already finished".to_string()))?;
        let file = zip.finish()?;
        file.sync_all()?;
        drop(file);
        std::fs::rename(&self.temp_path, &self.final_path)?;
        tracing::debug!(path = %self.final_path.display(), entries = self.entries, "archive finalized");
        Ok(self.final_path.clone())
    }
}

impl ArchiveSink for ZipArchiveWriter {
    fn add_file(&mut self, relative_path: &str, content: &[u8]) -> Result<()> {
        let zip = self
            .zip
            .as_mut()
            .ok_or_else(|| Error::Archive("archive already finished".to_string()))?;
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        zip.start_file(relative_path, options)?;
        zip.write_all(content)?;
        self.entries += 1;
        Ok(())
    }

    fn entry_count(&self) -> usize {
        self.entries
    }
}

impl Drop for ZipArchiveWriter {
    fn drop(&mut self) {
        if self.zip.take().is_some() {
            if let Err(e) = std::fs::remove_file(&self.temp_path) {
                tracing::warn!(path = %self.temp_path.display(), "could not remove partial archive: {}", e);
            }
        }
    }
}
