//! Log sink setup for the binary.

use anyhow::{Result, anyhow};
use herald_core::config::LoggingConfig;
use tracing_subscriber::EnvFilter;

/// Pick the level for herald's own events.
///
/// `-v` raises the configured level to debug, `-vv` to trace; `--quiet`
/// keeps only errors.
pub fn level(config: &LoggingConfig, verbose: u8, quiet: bool) -> String {
    if quiet {
        return "error".into();
    }
    match verbose {
        0 => config.level.clone(),
        1 => "debug".into(),
        _ => "trace".into(),
    }
}

/// Install the global tracing subscriber. Events go to stderr so stdout
/// stays machine-readable.
pub fn init(config: &LoggingConfig, verbose: u8, quiet: bool, json: bool) -> Result<()> {
    let level = level(config, verbose, quiet);
    let filter = EnvFilter::from_default_env().add_directive(format!("herald={level}").parse()?);

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose >= 2);

    if json || config.json {
        builder.json().try_init().map_err(|e| anyhow!(e))
    } else {
        builder.try_init().map_err(|e| anyhow!(e))
    }
}
