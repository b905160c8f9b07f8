//! `subfollow completions`

use std::io;

use anyhow::Result;
use clap::CommandFactory;
use clap_complete::{generate, Shell};
use subfollow::cli::Cli;

/// Print a completion script for `shell` to stdout.
pub fn handle(shell: Shell) -> Result<()> {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    generate(shell, &mut command, name, &mut io::stdout());
    Ok(())
}
