//! Mock implementations for testing the comment/status client.
//!
//! `MockGitHubApi` keeps an in-memory set of pull requests and comments and
//! records every call it receives; `RecordingLogger` keeps every event.

#![allow(clippy::unwrap_used)]

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use herald_github::{
    CommentAuthor, CommitStatus, CreateComment, CreateCommitStatus, Credential, Error, ErrorKind,
    GitHubApi, IssueComment, PullRequest, PullRequestState, RepositoryRef, Result, UpdateComment,
};

use crate::logger::Logger;

/// API operations that can be made to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    GetPr,
    ListComments,
    CreateComment,
    UpdateComment,
    CreateStatus,
}

/// A call received by the mock, in order of arrival.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCall {
    GetPr {
        repo: String,
        number: u64,
    },
    ListComments {
        repo: String,
        number: u64,
    },
    CreateComment {
        repo: String,
        number: u64,
        body: String,
    },
    UpdateComment {
        repo: String,
        comment_id: u64,
        body: String,
    },
    CreateStatus {
        repo: String,
        sha: String,
        status: CreateCommitStatus,
    },
}

/// Mock implementation of `GitHubApi` for testing.
pub struct MockGitHubApi {
    /// PR number to head SHA.
    prs: Mutex<HashMap<u64, Option<String>>>,
    /// (PR number, comment) in creation order.
    comments: Mutex<Vec<(u64, IssueComment)>>,
    calls: Mutex<Vec<ApiCall>>,
    failures: HashMap<Operation, fn() -> Error>,
    next_id: AtomicU64,
    hang: bool,
}

impl Default for MockGitHubApi {
    fn default() -> Self {
        Self::new()
    }
}

impl MockGitHubApi {
    pub fn new() -> Self {
        Self {
            prs: Mutex::new(HashMap::new()),
            comments: Mutex::new(Vec::new()),
            calls: Mutex::new(Vec::new()),
            failures: HashMap::new(),
            next_id: AtomicU64::new(1000),
            hang: false,
        }
    }

    pub fn with_pr(self, number: u64, head_sha: Option<&str>) -> Self {
        self.prs
            .lock()
            .unwrap()
            .insert(number, head_sha.map(String::from));
        self
    }

    pub fn with_comment(self, pr: u64, id: u64, body: &str) -> Self {
        self.prs
            .lock()
            .unwrap()
            .entry(pr)
            .or_insert_with(|| Some(format!("sha-{pr}")));
        self.comments.lock().unwrap().push((pr, comment(id, body)));
        self
    }

    pub fn failing(mut self, operation: Operation, error: fn() -> Error) -> Self {
        self.failures.insert(operation, error);
        self
    }

    /// Every call suspends forever.
    pub fn hanging(mut self) -> Self {
        self.hang = true;
        self
    }

    pub fn calls(&self) -> Vec<ApiCall> {
        self.calls.lock().unwrap().clone()
    }

    async fn enter(&self, operation: Operation, call: ApiCall) -> Result<()> {
        if self.hang {
            std::future::pending::<()>().await;
        }
        self.calls.lock().unwrap().push(call);
        match self.failures.get(&operation) {
            Some(error) => Err(error()),
            None => Ok(()),
        }
    }

    fn pr_exists(&self, number: u64) -> bool {
        self.prs.lock().unwrap().contains_key(&number)
    }
}

fn comment(id: u64, body: &str) -> IssueComment {
    let now = Utc::now();
    IssueComment {
        id,
        body: Some(body.to_string()),
        html_url: Some(format!("https://github.com/org/repo/pull/1#issuecomment-{id}")),
        user: Some(CommentAuthor {
            login: "herald-bot".into(),
        }),
        created_at: Some(now),
        updated_at: Some(now),
    }
}

impl GitHubApi for MockGitHubApi {
    async fn get_pr(
        &self,
        _credential: &Credential,
        repo: &RepositoryRef,
        number: u64,
    ) -> Result<PullRequest> {
        let call = ApiCall::GetPr {
            repo: repo.to_string(),
            number,
        };
        self.enter(Operation::GetPr, call).await?;

        let head_sha = self
            .prs
            .lock()
            .unwrap()
            .get(&number)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("/repos/{repo}/pulls/{number}")))?;

        Ok(PullRequest {
            number,
            title: format!("PR #{number}"),
            state: PullRequestState::Open,
            html_url: format!("https://github.com/{repo}/pull/{number}"),
            head_ref: Some("feature".into()),
            head_sha,
        })
    }

    async fn list_issue_comments(
        &self,
        _credential: &Credential,
        repo: &RepositoryRef,
        number: u64,
    ) -> Result<Vec<IssueComment>> {
        let call = ApiCall::ListComments {
            repo: repo.to_string(),
            number,
        };
        self.enter(Operation::ListComments, call).await?;

        Ok(self
            .comments
            .lock()
            .unwrap()
            .iter()
            .filter(|(pr, _)| *pr == number)
            .map(|(_, c)| c.clone())
            .collect())
    }

    async fn create_issue_comment(
        &self,
        _credential: &Credential,
        repo: &RepositoryRef,
        number: u64,
        create: CreateComment,
    ) -> Result<IssueComment> {
        let call = ApiCall::CreateComment {
            repo: repo.to_string(),
            number,
            body: create.body.clone(),
        };
        self.enter(Operation::CreateComment, call).await?;

        if !self.pr_exists(number) {
            return Err(Error::NotFound(format!("/repos/{repo}/issues/{number}")));
        }

        let created = comment(self.next_id.fetch_add(1, Ordering::Relaxed), &create.body);
        self.comments
            .lock()
            .unwrap()
            .push((number, created.clone()));
        Ok(created)
    }

    async fn update_issue_comment(
        &self,
        _credential: &Credential,
        repo: &RepositoryRef,
        comment_id: u64,
        update: UpdateComment,
    ) -> Result<IssueComment> {
        let call = ApiCall::UpdateComment {
            repo: repo.to_string(),
            comment_id,
            body: update.body.clone(),
        };
        self.enter(Operation::UpdateComment, call).await?;

        let mut comments = self.comments.lock().unwrap();
        let (_, existing) = comments
            .iter_mut()
            .find(|(_, c)| c.id == comment_id)
            .ok_or_else(|| {
                Error::NotFound(format!("/repos/{repo}/issues/comments/{comment_id}"))
            })?;

        existing.body = Some(update.body);
        existing.updated_at = Some(Utc::now());
        Ok(existing.clone())
    }

    async fn create_commit_status(
        &self,
        _credential: &Credential,
        repo: &RepositoryRef,
        sha: &str,
        status: CreateCommitStatus,
    ) -> Result<CommitStatus> {
        let call = ApiCall::CreateStatus {
            repo: repo.to_string(),
            sha: sha.to_string(),
            status: status.clone(),
        };
        self.enter(Operation::CreateStatus, call).await?;

        let now = Utc::now();
        Ok(CommitStatus {
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            state: status.state,
            target_url: status.target_url,
            description: status.description,
            context: status.context,
            created_at: Some(now),
            updated_at: Some(now),
        })
    }
}

/// An event received by `RecordingLogger`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogEvent {
    Info(String),
    Error { kind: ErrorKind, message: String },
}

/// Logger that keeps every event for later inspection.
#[derive(Default)]
pub struct RecordingLogger {
    events: Mutex<Vec<LogEvent>>,
}

impl RecordingLogger {
    pub fn events(&self) -> Vec<LogEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn infos(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                LogEvent::Info(message) => Some(message),
                LogEvent::Error { .. } => None,
            })
            .collect()
    }

    pub fn errors(&self) -> Vec<(ErrorKind, String)> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                LogEvent::Error { kind, message } => Some((kind, message)),
                LogEvent::Info(_) => None,
            })
            .collect()
    }
}

impl Logger for RecordingLogger {
    fn info(&self, message: &str) {
        self.events
            .lock()
            .unwrap()
            .push(LogEvent::Info(message.to_string()));
    }

    fn error(&self, error: &Error, message: &str) {
        self.events.lock().unwrap().push(LogEvent::Error {
            kind: error.kind(),
            message: message.to_string(),
        });
    }
}
