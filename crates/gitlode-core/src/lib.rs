pub mod config;
pub mod logging;

pub mod archive;
pub mod downloader;
pub mod error;
pub mod fetch;
pub mod github;
pub mod locator;
pub mod pipeline;
pub mod resolver;
pub mod retry;
pub mod tree_view;
pub mod walker;

pub use error::{Error, Result};

#[cfg(test)]
pub(crate) mod testing;
