//! `gitlode completions <shell>` – print a completion script.

use anyhow::Result;
use clap::CommandFactory;

use crate::cli::Cli;

pub fn run_completions(shell: clap_complete::Shell) -> Result<()> {
    let mut cmd = Cli::command();
    clap_complete::generate(shell, &mut cmd, "gitlode", &mut std::io::stdout());
    Ok(())
}
