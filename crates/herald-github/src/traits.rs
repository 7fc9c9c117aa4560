//! Trait abstractions for GitHub API operations.
//!
//! This module defines the `GitHubApi` trait which abstracts the REST calls
//! Herald needs, enabling dependency injection and testability.

use crate::{
    CommitStatus, CreateComment, CreateCommitStatus, Credential, IssueComment, PullRequest,
    RepositoryRef, Result, UpdateComment,
};

/// Trait for GitHub API operations.
///
/// Each method performs exactly one request, authenticated with the
/// credential passed in. Implementations must not cache credentials or
/// responses.
pub trait GitHubApi: Send + Sync {
    // === PR Operations ===

    /// Get a pull request by number.
    fn get_pr(
        &self,
        credential: &Credential,
        repo: &RepositoryRef,
        number: u64,
    ) -> impl std::future::Future<Output = Result<PullRequest>> + Send;

    // === Comment Operations ===

    /// List comments on an issue or pull request, in server order.
    fn list_issue_comments(
        &self,
        credential: &Credential,
        repo: &RepositoryRef,
        number: u64,
    ) -> impl std::future::Future<Output = Result<Vec<IssueComment>>> + Send;

    /// Create a comment on an issue or pull request.
    fn create_issue_comment(
        &self,
        credential: &Credential,
        repo: &RepositoryRef,
        number: u64,
        comment: CreateComment,
    ) -> impl std::future::Future<Output = Result<IssueComment>> + Send;

    /// Replace the body of an existing comment.
    fn update_issue_comment(
        &self,
        credential: &Credential,
        repo: &RepositoryRef,
        comment_id: u64,
        comment: UpdateComment,
    ) -> impl std::future::Future<Output = Result<IssueComment>> + Send;

    // === Status Operations ===

    /// Create a commit status for a SHA.
    fn create_commit_status(
        &self,
        credential: &Credential,
        repo: &RepositoryRef,
        sha: &str,
        status: CreateCommitStatus,
    ) -> impl std::future::Future<Output = Result<CommitStatus>> + Send;
}
