//! Archive assembly.
//!
//! The downloader writes `(relative path, bytes)` pairs into an
//! [`ArchiveSink`]. [`ZipArchiveWriter`] streams them into `<final>.part` and
//! renames atomically on [`ZipArchiveWriter::finish`]; an unfinished writer
//! removes its temp file on drop, so a failed export leaves no archive behind.

mod memory;
mod zip_writer;

pub use memory::MemoryArchive;
pub use zip_writer::ZipArchiveWriter;

use crate::error::Result;

/// Temporary file suffix used before atomic rename.
pub const TEMP_SUFFIX: &str = ".part";

/// Receives archive entries one at a time.
pub trait ArchiveSink {
    fn add_file(&mut self, relative_path: &str, content: &[u8]) -> Result<()>;

    /// Number of entries written so far.
    fn entry_count(&self) -> usize;
}

/// Path for the temp file: appends `.part` to the final path (`x.zip` → `x.zip.part`).
pub fn temp_path(final_path: &std::path::Path) -> std::path::PathBuf {
    let mut o = final_path.as_os_str().to_owned();
    o.push(TEMP_SUFFIX);
    std::path::PathBuf::from(o)
}
