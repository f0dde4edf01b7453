//! Repository URL modeling.
//!
//! Parses `https://github.com/<owner>/<repo>/tree/<ref-and-path>` into a
//! [`RepoLocator`] and derives the output archive filename from it.

mod archive_name;
mod parse;
mod sanitize;

pub use archive_name::{archive_file_name, ARCHIVE_EXTENSION};
pub use parse::{parse_locator, TREE_MARKER};
pub use sanitize::sanitize_filename_for_linux;

/// Owner, repository, and the still-ambiguous ref-and-path of a tree URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoLocator {
    pub owner: String,
    pub repo_name: String,
    /// Everything after the `tree` marker joined by `/`; `None` when the URL
    /// has no marker or nothing follows it.
    pub ref_and_path: Option<String>,
}

/// A confirmed branch and the directory path below the repository root
/// (empty for the root itself).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLocation {
    pub branch: String,
    pub path: String,
}

impl ResolvedLocation {
    /// Path shown to users: `(root)` for the repository root.
    pub fn display_path(&self) -> &str {
        if self.path.is_empty() {
            "(root)"
        } else {
            &self.path
        }
    }
}
