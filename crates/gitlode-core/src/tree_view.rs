//! Display tree for a listed directory.
//!
//! Builds a nested map from the flat file list (paths relative to the
//! resolved directory) and flattens it depth-first with folders before files
//! and names in case-insensitive order. Presentation only; no I/O.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::downloader::archive_relative_path;
use crate::walker::FileDescriptor;

const UNITS: [&str; 5] = ["Bytes", "KB", "MB", "GB", "TB"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum NodeKind {
    Folder,
    File,
}

/// One row of the rendered tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayNode {
    pub name: String,
    pub kind: NodeKind,
    pub depth: usize,
    /// File size; 0 for folders.
    pub size_bytes: u64,
}

impl DisplayNode {
    pub fn formatted_size(&self) -> String {
        format_bytes(self.size_bytes)
    }
}

enum TreeNode {
    Folder(BTreeMap<String, TreeNode>),
    File(u64),
}

/// Ordered display rows for `files`, relative to `base_path`.
pub fn build_display_tree(files: &[FileDescriptor], base_path: &str) -> Vec<DisplayNode> {
    let mut root: BTreeMap<String, TreeNode> = BTreeMap::new();

    for file in files {
        let relative = archive_relative_path(&file.absolute_path, base_path);
        let parts: Vec<&str> = relative.split('/').filter(|s| !s.is_empty()).collect();
        if !insert(&mut root, &parts, file.size_bytes) {
            tracing::debug!(path = %file.absolute_path, "path collides with a file; skipped in tree");
        }
    }

    let mut out = Vec::new();
    flatten(&root, 0, &mut out);
    out
}

/// Returns false when a directory segment is already taken by a file.
fn insert(level: &mut BTreeMap<String, TreeNode>, parts: &[&str], size: u64) -> bool {
    match parts {
        [] => true,
        [leaf] => {
            level
                .entry(leaf.to_string())
                .or_insert(TreeNode::File(size));
            true
        }
        [dir, rest @ ..] => match level
            .entry(dir.to_string())
            .or_insert_with(|| TreeNode::Folder(BTreeMap::new()))
        {
            TreeNode::Folder(children) => insert(children, rest, size),
            TreeNode::File(_) => false,
        },
    }
}

fn flatten(level: &BTreeMap<String, TreeNode>, depth: usize, out: &mut Vec<DisplayNode>) {
    let mut children: Vec<(&String, &TreeNode)> = level.iter().collect();
    children.sort_by(|(a_name, a), (b_name, b)| {
        kind_of(a)
            .cmp(&kind_of(b))
            .then_with(|| compare_names(a_name, b_name))
    });

    for (name, node) in children {
        match node {
            TreeNode::Folder(grandchildren) => {
                out.push(DisplayNode {
                    name: name.clone(),
                    kind: NodeKind::Folder,
                    depth,
                    size_bytes: 0,
                });
                flatten(grandchildren, depth + 1, out);
            }
            TreeNode::File(size) => out.push(DisplayNode {
                name: name.clone(),
                kind: NodeKind::File,
                depth,
                size_bytes: *size,
            }),
        }
    }
}

fn kind_of(node: &TreeNode) -> NodeKind {
    match node {
        TreeNode::Folder(_) => NodeKind::Folder,
        TreeNode::File(_) => NodeKind::File,
    }
}

/// Case-insensitive, with lowercase before uppercase when names differ only in case.
fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| b.cmp(a))
}

/// Human-readable size in the largest fitting unit (base 1024), up to two decimals.
///
/// # Examples
///
/// - `format_bytes(0)` → `"0 Bytes"`
/// - `format_bytes(1536)` → `"1.5 KB"`
pub fn format_bytes(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    let mut unit = 0;
    let mut scale = 1u64;
    while unit + 1 < UNITS.len() && bytes >= scale * 1024 {
        scale *= 1024;
        unit += 1;
    }
    let value = format!("{:.2}", bytes as f64 / scale as f64);
    let value = value.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", value, UNITS[unit])
}
