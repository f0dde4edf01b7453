use std::collections::BTreeMap;

use super::ArchiveSink;
use crate::error::{Error, Result};

/// In-memory archive keyed by relative path. Rejects duplicate paths.
#[derive(Debug, Default, Clone)]
pub struct MemoryArchive {
    entries: BTreeMap<String, Vec<u8>>,
}

impl MemoryArchive {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, relative_path: &str) -> Option<&[u8]> {
        self.entries.get(relative_path).map(Vec::as_slice)
    }

    /// Entry paths in sorted order.
    pub fn paths(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }
}

impl ArchiveSink for MemoryArchive {
    fn add_file(&mut self, relative_path: &str, content: &[u8]) -> Result<()> {
        if self.entries.contains_key(relative_path) {
            return Err(Error::Archive(format!("duplicate entry {}", relative_path)));
        }
        self.entries.insert(relative_path.to_string(), content.to_vec());
        Ok(())
    }

    fn entry_count(&self) -> usize {
        self.entries.len()
    }
}
