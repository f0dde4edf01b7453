//! Output archive filename derivation.

use super::sanitize::sanitize_filename_for_linux;
use super::RepoLocator;

pub const ARCHIVE_EXTENSION: &str = "zip";

/// Fallback stem when sanitization leaves nothing usable.
const DEFAULT_STEM: &str = "download";

/// `<repo>-<ref_and_path with "/" replaced by "_">.zip`, sanitized for Linux.
///
/// # Examples
///
/// - repo `hello`, ref-and-path `main/src/utils` → `hello-main_src_utils.zip`
pub fn archive_file_name(locator: &RepoLocator) -> String {
    let suffix = locator
        .ref_and_path
        .as_deref()
        .unwrap_or_default()
        .replace('/', "_");
    let raw = if suffix.is_empty() {
        locator.repo_name.clone()
    } else {
        format!("{}-{}", locator.repo_name, suffix)
    };

    let stem = sanitize_filename_for_linux(&raw);
    let stem = if stem.is_empty() || stem == "." || stem == ".." {
        DEFAULT_STEM.to_string()
    } else {
        stem
    };
    format!("{}.{}", stem, ARCHIVE_EXTENSION)
}
