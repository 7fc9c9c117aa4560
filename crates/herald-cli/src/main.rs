//! Herald CLI - publish pull request comments and commit statuses.

use clap::Parser;

mod commands;
mod logging;
mod output;

use commands::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    output::set_quiet(cli.quiet);

    if let Err(e) = run(cli) {
        output::error(&format!("{e:#}"));
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    if let Commands::Completions { shell } = cli.command {
        return commands::completions::run(shell);
    }

    let config = commands::utils::load_config(cli.config.as_deref())?;
    logging::init(&config.logging, cli.verbose, cli.quiet, cli.json_logs)?;

    match cli.command {
        Commands::Comment(command) => commands::comment::run(cli.repo.as_deref(), &config, command),
        Commands::Status(args) => commands::status::run(cli.repo.as_deref(), &config, args),
        Commands::Completions { .. } => Ok(()),
    }
}
