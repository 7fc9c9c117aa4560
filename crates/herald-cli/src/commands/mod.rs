//! Command definitions and handlers.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};
use clap_complete::Shell;
use herald_github::CommitStatusState;

pub mod comment;
pub mod completions;
pub mod status;
pub mod utils;

/// Marker used by `comment sync` when none is given.
pub const DEFAULT_MARKER: &str = "<!-- herald -->";

#[derive(Parser)]
#[command(name = "herald")]
#[command(about = "Publish pull request comments and commit statuses on GitHub")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Repository as owner/name (defaults to $GITHUB_REPOSITORY, then the origin remote)
    #[arg(long, global = true, value_name = "OWNER/NAME")]
    pub repo: Option<String>,

    /// Path to a config file (defaults to .herald.toml at the repository root)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Only print errors and essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Emit log events as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Publish, edit or list pull request comments
    #[command(subcommand)]
    Comment(CommentCommand),

    /// Set a commit status on a pull request's head commit
    Status(StatusArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum CommentCommand {
    /// Publish a new comment on a pull request
    Post {
        /// Pull request number
        pr: u64,

        #[command(flatten)]
        body: BodyArgs,
    },

    /// Replace the body of an existing comment
    Edit {
        /// Comment id
        comment_id: u64,

        #[command(flatten)]
        body: BodyArgs,
    },

    /// List the comments on a pull request
    List {
        /// Pull request number
        pr: u64,

        /// Print comments as JSON
        #[arg(long)]
        json: bool,
    },

    /// Create or update the single comment carrying a marker
    Sync {
        /// Pull request number
        pr: u64,

        /// Text identifying the comment to keep updated
        #[arg(long, default_value = DEFAULT_MARKER)]
        marker: String,

        #[command(flatten)]
        body: BodyArgs,
    },
}

/// Where a comment body comes from.
#[derive(Args)]
#[group(required = true, multiple = false)]
pub struct BodyArgs {
    /// Comment body
    #[arg(long)]
    pub body: Option<String>,

    /// Read the comment body from a file (`-` for stdin)
    #[arg(long, value_name = "PATH")]
    pub body_file: Option<PathBuf>,
}

#[derive(Args)]
pub struct StatusArgs {
    /// Pull request number
    pub pr: u64,

    /// Status state: pending, success, error or failure
    #[arg(long)]
    pub state: CommitStatusState,

    /// Status context (defaults to `status.context` from config)
    #[arg(long)]
    pub context: Option<String>,

    /// Short description shown next to the status
    #[arg(long, default_value = "")]
    pub description: String,

    /// Link shown next to the status
    #[arg(long)]
    pub target_url: Option<String>,
}
