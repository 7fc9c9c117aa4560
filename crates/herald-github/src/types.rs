//! GitHub API types.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A repository on the hosting provider, `owner/name`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepositoryRef {
    owner: String,
    name: String,
}

impl RepositoryRef {
    /// Create a repository reference.
    ///
    /// # Errors
    /// Returns [`Error::InvalidInput`] if either part is empty, is `.` or `..`,
    /// or contains characters outside `[A-Za-z0-9._-]`.
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Result<Self> {
        let owner = owner.into().trim().to_string();
        let name = name.into().trim().to_string();

        for (label, value) in [("owner", &owner), ("name", &name)] {
            if value.is_empty() {
                return Err(Error::InvalidInput(format!(
                    "repository {label} must not be empty"
                )));
            }
            // Both parts become URL path segments.
            if value == "." || value == ".." || !value.chars().all(is_repo_char) {
                return Err(Error::InvalidInput(format!(
                    "invalid repository {label}: '{value}'"
                )));
            }
        }

        Ok(Self { owner, name })
    }

    /// Repository owner (user or organization).
    #[must_use]
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Repository name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

const fn is_repo_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-')
}

impl fmt::Display for RepositoryRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

impl FromStr for RepositoryRef {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (owner, name) = s
            .trim()
            .split_once('/')
            .ok_or_else(|| Error::InvalidInput(format!("expected owner/name, got '{s}'")))?;
        Self::new(owner, name)
    }
}

/// A GitHub Pull Request, reduced to what status publishing needs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PullRequest {
    /// PR number.
    pub number: u64,

    /// PR title.
    pub title: String,

    /// PR state.
    pub state: PullRequestState,

    /// PR URL.
    pub html_url: String,

    /// Head branch name.
    pub head_ref: Option<String>,

    /// Commit at the tip of the head branch, if the server reported one.
    pub head_sha: Option<String>,
}

/// State of a pull request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PullRequestState {
    /// PR is open.
    Open,
    /// PR was closed without merging.
    Closed,
    /// PR was merged.
    Merged,
}

/// Author of a comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentAuthor {
    /// Login name.
    pub login: String,
}

/// A comment on an issue or pull request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssueComment {
    /// Comment ID.
    pub id: u64,

    /// Comment body.
    pub body: Option<String>,

    /// Comment URL.
    #[serde(default)]
    pub html_url: Option<String>,

    /// Who wrote the comment.
    #[serde(default)]
    pub user: Option<CommentAuthor>,

    /// When the comment was created.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    /// When the comment was last edited.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Request to create an issue/PR comment.
#[derive(Debug, Serialize)]
pub struct CreateComment {
    /// Comment body.
    pub body: String,
}

/// Request to update an issue/PR comment.
#[derive(Debug, Serialize)]
pub struct UpdateComment {
    /// New comment body.
    pub body: String,
}

/// State of a commit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommitStatusState {
    /// Checks are still running.
    Pending,
    /// Checks passed.
    Success,
    /// Checks could not run.
    Error,
    /// Checks ran and failed.
    Failure,
}

impl CommitStatusState {
    /// The wire name of this state.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Success => "success",
            Self::Error => "error",
            Self::Failure => "failure",
        }
    }
}

impl fmt::Display for CommitStatusState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CommitStatusState {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "success" => Ok(Self::Success),
            "error" => Ok(Self::Error),
            "failure" => Ok(Self::Failure),
            _ => Err(Error::InvalidInput(format!(
                "invalid commit status state '{s}' - use pending, success, error or failure"
            ))),
        }
    }
}

/// Request to create a commit status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateCommitStatus {
    /// Status state.
    pub state: CommitStatusState,

    /// Link shown next to the status.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_url: Option<String>,

    /// Short description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Status line item; a later status with the same context replaces this one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

/// A commit status as recorded by the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitStatus {
    /// Status ID.
    pub id: u64,

    /// Status state.
    pub state: CommitStatusState,

    /// Link shown next to the status.
    #[serde(default)]
    pub target_url: Option<String>,

    /// Short description.
    #[serde(default)]
    pub description: Option<String>,

    /// Status line item.
    #[serde(default)]
    pub context: Option<String>,

    /// When the status was created.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    /// When the status was last updated.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}
