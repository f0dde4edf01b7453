//! Tree URL parsing.

use super::RepoLocator;

/// Path segment that separates `<owner>/<repo>` from the ref-and-path.
pub const TREE_MARKER: &str = "tree";

/// Parses a repository URL on `expected_host`.
///
/// Returns `None` if the URL does not parse, is on another host, or has fewer
/// than two path segments. A URL without a `tree` segment (or with nothing
/// after it) yields a locator whose `ref_and_path` is `None`.
///
/// # Examples
///
/// - `https://github.com/o/r/tree/main/src` → owner `o`, repo `r`, ref-and-path `main/src`
/// - `https://github.com/o/r` → ref-and-path `None`
pub fn parse_locator(url: &str, expected_host: &str) -> Option<RepoLocator> {
    let parsed = url::Url::parse(url.trim()).ok()?;
    if !parsed
        .host_str()
        .is_some_and(|h| h.eq_ignore_ascii_case(expected_host))
    {
        return None;
    }

    let parts: Vec<&str> = parsed
        .path_segments()?
        .filter(|s| !s.is_empty())
        .collect();
    if parts.len() < 2 {
        return None;
    }

    let owner = parts[0].to_string();
    let repo_name = parts[1].to_string();
    // Only segments after owner and repo can carry the marker.
    let rest = &parts[2..];
    let ref_and_path = rest
        .iter()
        .position(|s| *s == TREE_MARKER)
        .map(|i| rest[i + 1..].join("/"))
        .filter(|s| !s.is_empty());

    Some(RepoLocator {
        owner,
        repo_name,
        ref_and_path,
    })
}
