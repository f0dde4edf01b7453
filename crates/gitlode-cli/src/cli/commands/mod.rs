//! CLI command handlers. Each command is in its own file.

mod completions;
mod download;
mod man;
pub(crate) mod render;
mod tree;

pub use completions::run_completions;
pub use download::run_download;
pub use man::run_man;
pub use tree::run_tree;
