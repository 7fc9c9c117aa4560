//! `herald completions` - print a shell completion script.

use std::io;

use clap::CommandFactory;
use clap_complete::{Shell, generate};

use super::Cli;

#[allow(clippy::unnecessary_wraps)]
pub fn run(shell: Shell) -> anyhow::Result<()> {
    let mut cmd = Cli::command();
    let bin = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin, &mut io::stdout());
    Ok(())
}
