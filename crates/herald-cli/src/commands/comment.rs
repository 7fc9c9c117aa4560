//! `herald comment` - publish, edit, list and sync pull request comments.

use anyhow::Result;
use herald_core::{Config, SyncOutcome};
use herald_github::IssueComment;

use super::CommentCommand;
use super::utils::{self, Session};
use crate::output;

/// Run a comment subcommand.
pub fn run(repo: Option<&str>, config: &Config, command: CommentCommand) -> Result<()> {
    // Read the body before touching the network so a bad path fails fast.
    let body = match &command {
        CommentCommand::Post { body, .. }
        | CommentCommand::Edit { body, .. }
        | CommentCommand::Sync { body, .. } => Some(body.read()?),
        CommentCommand::List { .. } => None,
    };

    let session = utils::connect(repo, config)?;
    let rt = utils::runtime()?;

    match command {
        CommentCommand::Post { pr, .. } => {
            let body = body.unwrap_or_default();
            let comment = rt.block_on(session.client.publish_comment(
                &session.credential,
                &session.repo,
                pr,
                &body,
            ))?;
            output::success(&format!("Published comment on {}#{pr}", session.repo));
            print_url(&comment);
        }
        CommentCommand::Edit { comment_id, .. } => {
            let body = body.unwrap_or_default();
            let comment = rt.block_on(session.client.edit_comment(
                &session.credential,
                &session.repo,
                comment_id,
                &body,
            ))?;
            output::success(&format!("Updated comment #{comment_id}"));
            print_url(&comment);
        }
        CommentCommand::List { pr, json } => {
            let comments = rt.block_on(session.client.list_comments(
                &session.credential,
                &session.repo,
                pr,
            ))?;
            if json {
                output::essential(&serde_json::to_string_pretty(&comments)?);
            } else {
                print_comments(&session, pr, &comments);
            }
        }
        CommentCommand::Sync { pr, marker, .. } => {
            let body = body.unwrap_or_default();
            let outcome = rt.block_on(session.client.sync_comment(
                &session.credential,
                &session.repo,
                pr,
                &marker,
                &body,
            ))?;
            match &outcome {
                SyncOutcome::Created(_) => {
                    output::success(&format!("Published comment on {}#{pr}", session.repo));
                }
                SyncOutcome::Updated(c) => output::success(&format!("Updated comment #{}", c.id)),
            }
            print_url(outcome.comment());
        }
    }

    Ok(())
}

fn print_url(comment: &IssueComment) {
    match &comment.html_url {
        Some(url) => output::essential(url),
        None => output::essential(&comment.id.to_string()),
    }
}

fn print_comments(session: &Session, pr: u64, comments: &[IssueComment]) {
    if comments.is_empty() {
        output::info(&format!("No comments on {}#{pr}", session.repo));
        return;
    }

    for (i, comment) in comments.iter().enumerate() {
        if i > 0 {
            output::hr();
        }
        output::detail(&output::comment_heading(comment));
        if let Some(body) = comment.body.as_deref().filter(|b| !b.is_empty()) {
            output::detail(body);
        }
    }
}
