//! CLI for gitlode.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use gitlode_core::config;
use std::path::PathBuf;

use commands::{run_completions, run_download, run_man, run_tree};

/// Download a single directory of a GitHub repository as a zip archive.
#[derive(Debug, Parser)]
#[command(name = "gitlode", version)]
#[command(about = "gitlode: download a GitHub directory as a zip archive", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Download the directory behind a GitHub tree URL into a zip archive.
    Download {
        /// URL of the form https://github.com/<owner>/<repo>/tree/<branch>/<path>.
        url: String,

        /// GitHub token sent as a bearer credential (raises the API rate limit).
        #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
        token: Option<String>,

        /// Directory the archive is written to (default: current directory).
        #[arg(long, short = 'o', value_name = "DIR")]
        output_dir: Option<PathBuf>,

        /// Fetch up to N files at once (0 = no limit; default from config).
        #[arg(long, value_name = "N")]
        jobs: Option<usize>,
    },

    /// Resolve a GitHub tree URL and print its file tree without downloading.
    Tree {
        /// URL of the form https://github.com/<owner>/<repo>/tree/<branch>/<path>.
        url: String,

        /// GitHub token sent as a bearer credential.
        #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
        token: Option<String>,
    },

    /// Print a shell completion script to stdout.
    Completions {
        /// Target shell.
        shell: clap_complete::Shell,
    },

    /// Print the roff man page to stdout.
    Man,
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        // These two only describe the CLI itself; no config needed.
        match cli.command {
            CliCommand::Completions { shell } => return run_completions(shell),
            CliCommand::Man => return run_man(),
            _ => {}
        }

        let mut cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Download {
                url,
                token,
                output_dir,
                jobs,
            } => {
                if let Some(n) = jobs {
                    cfg.max_concurrent_fetches = (n > 0).then_some(n);
                }
                let output_dir = match output_dir {
                    Some(dir) => dir,
                    None => std::env::current_dir()?,
                };
                run_download(cfg, &url, token, &output_dir).await?;
            }
            CliCommand::Tree { url, token } => run_tree(cfg, &url, token).await?,
            CliCommand::Completions { .. } | CliCommand::Man => {}
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
