//! `herald status` - set a commit status on a pull request's head commit.

use anyhow::Result;
use herald_core::{CommitStatusRequest, Config};

use super::StatusArgs;
use super::utils;
use crate::output;

/// Run the status command.
pub fn run(repo: Option<&str>, config: &Config, args: StatusArgs) -> Result<()> {
    let request = CommitStatusRequest {
        state: args.state,
        target_url: args.target_url,
        description: args.description,
        context: args.context.unwrap_or_else(|| config.status.context.clone()),
    };

    let session = utils::connect(repo, config)?;
    let rt = utils::runtime()?;

    let status = rt.block_on(session.client.create_status(
        &session.credential,
        &session.repo,
        args.pr,
        &request,
    ))?;

    output::success(&format!(
        "Set {} status '{}' on {}#{}",
        output::state_label(status.state),
        request.context,
        session.repo,
        args.pr
    ));
    if let Some(description) = status.description.as_deref() {
        output::detail(&format!("  {description}"));
    }
    if let Some(url) = status.target_url.as_deref() {
        output::detail(&format!("  {url}"));
    }
    output::essential(&status.id.to_string());

    Ok(())
}
