//! Comment and commit status publishing for pull requests.
//!
//! [`CommentStatusClient`] turns four intents (publish, edit, list, status)
//! into calls on a [`GitHubApi`], and reports every outcome through a
//! [`Logger`]: one error event per failure, one info event per successful
//! write. Listing is a read and logs failures only.
//!
//! No call is retried and nothing is cached; the caller decides what to do
//! with a failure.

use herald_github::{
    CommitStatus, CommitStatusState, CreateComment, CreateCommitStatus, Credential, Error,
    GitHubApi, IssueComment, RepositoryRef, Result, UpdateComment,
};

use crate::logger::Logger;

/// Message carried by every failure event.
pub const API_ERROR_MESSAGE: &str = "Found error while accessing GitHub API.";

/// A commit status to attach to a pull request's head commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitStatusRequest {
    /// Status state.
    pub state: CommitStatusState,

    /// Link shown next to the status.
    pub target_url: Option<String>,

    /// Short description; omitted from the request when empty.
    pub description: String,

    /// Status line item; a later status with the same context replaces this one.
    pub context: String,
}

impl CommitStatusRequest {
    fn to_wire(&self) -> CreateCommitStatus {
        CreateCommitStatus {
            state: self.state,
            target_url: self.target_url.clone(),
            description: Some(self.description.clone()).filter(|d| !d.is_empty()),
            context: Some(self.context.clone()),
        }
    }
}

/// What [`CommentStatusClient::sync_comment`] did.
#[derive(Debug, Clone)]
pub enum SyncOutcome {
    /// No marked comment existed; a new one was published.
    Created(IssueComment),
    /// The marked comment was edited in place.
    Updated(IssueComment),
}

impl SyncOutcome {
    /// The comment as returned by the server.
    #[must_use]
    pub const fn comment(&self) -> &IssueComment {
        match self {
            Self::Created(c) | Self::Updated(c) => c,
        }
    }
}

/// Publishes pull request comments and commit statuses.
pub struct CommentStatusClient<H: GitHubApi, L: Logger> {
    api: H,
    logger: L,
}

impl<H: GitHubApi, L: Logger> CommentStatusClient<H, L> {
    /// Create a client over `api`, reporting through `logger`.
    #[must_use]
    pub const fn new(api: H, logger: L) -> Self {
        Self { api, logger }
    }

    /// The underlying API.
    #[must_use]
    pub const fn api(&self) -> &H {
        &self.api
    }

    /// The logger outcomes are reported to.
    #[must_use]
    pub const fn logger(&self) -> &L {
        &self.logger
    }

    /// Publish a new comment on a pull request.
    ///
    /// # Errors
    /// Returns the API error unchanged, or [`Error::InvalidInput`] for a zero
    /// PR number or a blank body.
    pub async fn publish_comment(
        &self,
        credential: &Credential,
        repo: &RepositoryRef,
        pr_number: u64,
        body: &str,
    ) -> Result<IssueComment> {
        let result = async {
            require_positive(pr_number, "pull request number")?;
            require_text(body, "comment body")?;
            self.api
                .create_issue_comment(
                    credential,
                    repo,
                    pr_number,
                    CreateComment {
                        body: body.to_string(),
                    },
                )
                .await
        }
        .await;

        self.logged(
            result,
            &format!("publishing comment on {repo}#{pr_number}"),
            |comment| format!("Published comment {} on {repo}#{pr_number}", comment.id),
        )
    }

    /// Replace the body of an existing comment.
    ///
    /// # Errors
    /// Returns [`Error::NotFound`] when the comment does not exist or is not
    /// accessible, any other API error unchanged, or [`Error::InvalidInput`].
    pub async fn edit_comment(
        &self,
        credential: &Credential,
        repo: &RepositoryRef,
        comment_id: u64,
        body: &str,
    ) -> Result<IssueComment> {
        let result = async {
            require_positive(comment_id, "comment id")?;
            require_text(body, "comment body")?;
            self.api
                .update_issue_comment(
                    credential,
                    repo,
                    comment_id,
                    UpdateComment {
                        body: body.to_string(),
                    },
                )
                .await
        }
        .await;

        self.logged(
            result,
            &format!("editing comment {comment_id} on {repo}"),
            |_| format!("Edited comment {comment_id} on {repo}"),
        )
    }

    /// List the comments on a pull request, in the order the server returns.
    ///
    /// Success is not logged.
    ///
    /// # Errors
    /// Returns the API error unchanged, or [`Error::InvalidInput`].
    pub async fn list_comments(
        &self,
        credential: &Credential,
        repo: &RepositoryRef,
        pr_number: u64,
    ) -> Result<Vec<IssueComment>> {
        let result = async {
            require_positive(pr_number, "pull request number")?;
            self.api
                .list_issue_comments(credential, repo, pr_number)
                .await
        }
        .await;

        self.logged_failure(result, &format!("listing comments on {repo}#{pr_number}"))
    }

    /// Attach a commit status to the head commit of a pull request.
    ///
    /// Looks the pull request up first, then creates the status on its head
    /// SHA. The second call is never made if the first fails.
    ///
    /// # Errors
    /// Returns the lookup or status error unchanged, [`Error::MissingHeadSha`]
    /// if the pull request has no head commit, or [`Error::InvalidInput`].
    pub async fn create_status(
        &self,
        credential: &Credential,
        repo: &RepositoryRef,
        pr_number: u64,
        request: &CommitStatusRequest,
    ) -> Result<CommitStatus> {
        let result = async {
            require_positive(pr_number, "pull request number")?;
            require_text(&request.context, "status context")?;

            let pr = self.api.get_pr(credential, repo, pr_number).await?;
            let sha = pr
                .head_sha
                .filter(|sha| !sha.trim().is_empty())
                .ok_or(Error::MissingHeadSha(pr_number))?;

            let status = self
                .api
                .create_commit_status(credential, repo, &sha, request.to_wire())
                .await?;
            Ok::<_, Error>((sha, status))
        }
        .await;

        self.logged(
            result,
            &format!(
                "creating {} status '{}' for {repo}#{pr_number}",
                request.state, request.context
            ),
            |(sha, _)| {
                format!(
                    "Created {} status '{}' on {repo}@{sha} (#{pr_number})",
                    request.state, request.context
                )
            },
        )
        .map(|(_, status)| status)
    }

    /// Keep a single marked comment on a pull request up to date.
    ///
    /// Edits the first comment whose body contains `marker`, or publishes a
    /// new one when none does. The written body always contains the marker.
    ///
    /// # Errors
    /// Returns the first failing step's error, or [`Error::InvalidInput`] for a
    /// blank marker.
    pub async fn sync_comment(
        &self,
        credential: &Credential,
        repo: &RepositoryRef,
        pr_number: u64,
        marker: &str,
        body: &str,
    ) -> Result<SyncOutcome> {
        let marker = self.logged_failure(
            require_text(marker, "comment marker").map(|()| marker.trim()),
            &format!("syncing comment on {repo}#{pr_number}"),
        )?;
        let body = with_marker(marker, body);

        let comments = self.list_comments(credential, repo, pr_number).await?;
        let existing = comments
            .iter()
            .find(|c| c.body.as_deref().is_some_and(|b| b.contains(marker)));

        match existing {
            Some(comment) => self
                .edit_comment(credential, repo, comment.id, &body)
                .await
                .map(SyncOutcome::Updated),
            None => self
                .publish_comment(credential, repo, pr_number, &body)
                .await
                .map(SyncOutcome::Created),
        }
    }

    /// Log a failure once, or an info event built by `success`.
    fn logged<T>(
        &self,
        result: Result<T>,
        operation: &str,
        success: impl FnOnce(&T) -> String,
    ) -> Result<T> {
        let value = self.logged_failure(result, operation)?;
        self.logger.info(&success(&value));
        Ok(value)
    }

    /// Log a failure once; success passes through silently.
    fn logged_failure<T>(&self, result: Result<T>, operation: &str) -> Result<T> {
        result.inspect_err(|err| {
            self.logger
                .error(err, &format!("{API_ERROR_MESSAGE} Failed while {operation}"));
        })
    }
}

impl<H: GitHubApi + std::fmt::Debug, L: Logger> std::fmt::Debug for CommentStatusClient<H, L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommentStatusClient")
            .field("api", &self.api)
            .finish_non_exhaustive()
    }
}

fn require_positive(value: u64, what: &str) -> Result<()> {
    if value == 0 {
        return Err(Error::InvalidInput(format!("{what} must be positive")));
    }
    Ok(())
}

fn require_text(value: &str, what: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::InvalidInput(format!("{what} must not be empty")));
    }
    Ok(())
}

/// Prepend `marker` on its own line unless `body` already contains it.
fn with_marker(marker: &str, body: &str) -> String {
    if body.contains(marker) {
        body.to_string()
    } else {
        format!("{marker}\n{body}")
    }
}
