//! # herald-github
//!
//! GitHub REST integration for Herald: pull request lookup, issue comments
//! and commit statuses.
//!
//! # Security
//!
//! Tokens travel as [`Credential`] values wrapping a `SecretString`, which
//! zeroizes memory when dropped. The client never stores a credential; each
//! call receives the one it should authenticate with.

mod auth;
mod client;
mod error;
mod traits;
mod types;

pub use auth::{Auth, Credential};
pub use client::{ClientOptions, GitHubClient};
pub use error::{Error, ErrorKind, Result};
pub use traits::GitHubApi;
// Re-export SecretString for constructing Auth::Token
pub use secrecy::SecretString;
pub use types::{
    CommentAuthor, CommitStatus, CommitStatusState, CreateComment, CreateCommitStatus,
    IssueComment, PullRequest, PullRequestState, RepositoryRef, UpdateComment,
};
