//! GitHub API client.

use std::time::Duration;

use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;

use crate::auth::Credential;
use crate::error::{Error, Result};
use crate::traits::GitHubApi;
use crate::types::{
    CommitStatus, CreateComment, CreateCommitStatus, IssueComment, PullRequest, PullRequestState,
    RepositoryRef, UpdateComment,
};

// === Internal API response types ===

/// Internal representation of a PR from the GitHub API.
#[derive(serde::Deserialize)]
struct ApiPullRequest {
    number: u64,
    #[serde(default)]
    title: String,
    state: String,
    /// Whether the PR was merged (GitHub returns state="closed" + merged=true for merged PRs).
    #[serde(default)]
    merged: bool,
    #[serde(default)]
    html_url: String,
    head: Option<ApiHead>,
}

/// Internal representation of the head ref of a PR.
#[derive(serde::Deserialize)]
struct ApiHead {
    #[serde(rename = "ref")]
    ref_name: Option<String>,
    sha: Option<String>,
}

impl ApiPullRequest {
    /// Convert API response to domain type.
    fn into_pull_request(self) -> PullRequest {
        let state = if self.merged {
            PullRequestState::Merged
        } else {
            match self.state.as_str() {
                "open" => PullRequestState::Open,
                _ => PullRequestState::Closed,
            }
        };

        let (head_ref, head_sha) = self
            .head
            .map_or((None, None), |head| (head.ref_name, head.sha));

        PullRequest {
            number: self.number,
            title: self.title,
            state,
            html_url: self.html_url,
            head_ref,
            head_sha: head_sha.filter(|sha| !sha.trim().is_empty()),
        }
    }
}

/// Error body returned by the GitHub API.
#[derive(serde::Deserialize)]
struct ApiMessage {
    message: String,
}

/// Transport options for [`GitHubClient`].
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Request timeout; `None` leaves reqwest's default (no timeout).
    pub timeout: Option<Duration>,

    /// Value of the `User-Agent` header.
    pub user_agent: String,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            timeout: None,
            user_agent: "herald".into(),
        }
    }
}

/// GitHub API client.
///
/// Holds only the HTTP connection pool and the API root. Credentials are
/// supplied per call.
pub struct GitHubClient {
    client: Client,
    base_url: String,
}

impl GitHubClient {
    /// Default GitHub API URL.
    pub const DEFAULT_API_URL: &'static str = "https://api.github.com";

    /// Create a new GitHub client.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be built.
    pub fn new() -> Result<Self> {
        Self::with_base_url(Self::DEFAULT_API_URL)
    }

    /// Create a new GitHub client with a custom API URL (for GitHub Enterprise).
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be built.
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        Self::with_options(base_url, &ClientOptions::default())
    }

    /// Create a new GitHub client with a custom API URL and transport options.
    ///
    /// # Errors
    /// Returns error if the user agent is not a valid header value or the
    /// HTTP client cannot be built.
    pub fn with_options(base_url: impl Into<String>, options: &ClientOptions) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&options.user_agent).map_err(|_| {
                Error::InvalidInput(format!("invalid user agent: {}", options.user_agent))
            })?,
        );
        headers.insert(
            "X-GitHub-Api-Version",
            HeaderValue::from_static("2022-11-28"),
        );

        let mut builder = Client::builder().default_headers(headers);
        if let Some(timeout) = options.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// The API root this client talks to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Make a GET request.
    async fn get<T: DeserializeOwned>(&self, credential: &Credential, path: &str) -> Result<T> {
        let request = self.client.get(self.url(path));
        self.send(request, credential, path).await
    }

    /// Make a POST request.
    async fn post<T: DeserializeOwned, B: serde::Serialize + Sync>(
        &self,
        credential: &Credential,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let request = self.client.post(self.url(path)).json(body);
        self.send(request, credential, path).await
    }

    /// Make a PATCH request.
    async fn patch<T: DeserializeOwned, B: serde::Serialize + Sync>(
        &self,
        credential: &Credential,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let request = self.client.patch(self.url(path)).json(body);
        self.send(request, credential, path).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Authenticate, send, and decode a request.
    async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        credential: &Credential,
        path: &str,
    ) -> Result<T> {
        let response = request
            .header(AUTHORIZATION, credential.bearer())
            .send()
            .await?;

        Self::handle_response(response, path).await
    }

    /// Handle API response.
    async fn handle_response<T: DeserializeOwned>(
        response: reqwest::Response,
        path: &str,
    ) -> Result<T> {
        let status = response.status();

        if status.is_success() {
            let text = response.text().await?;
            return Ok(serde_json::from_str(&text)?);
        }

        // Handle error responses
        let status_code = status.as_u16();
        let rate_limit_exhausted = response
            .headers()
            .get("x-ratelimit-remaining")
            .is_some_and(|v| v == "0");
        let text = response.text().await.unwrap_or_default();
        let message = api_message(&text);

        match status_code {
            429 => Err(Error::RateLimited),
            403 if rate_limit_exhausted => Err(Error::RateLimited),
            401 | 403 => Err(Error::AuthenticationFailed {
                status: status_code,
                message,
            }),
            404 | 410 => Err(Error::NotFound(format!("{path} ({message})"))),
            _ => Err(Error::ApiError {
                status: status_code,
                message,
            }),
        }
    }

    // === PR Operations ===

    /// Get a pull request by number.
    ///
    /// # Errors
    /// Returns error if PR not found or API call fails.
    pub async fn get_pr(
        &self,
        credential: &Credential,
        repo: &RepositoryRef,
        number: u64,
    ) -> Result<PullRequest> {
        let api_pr: ApiPullRequest = self
            .get(credential, &format!("/repos/{repo}/pulls/{number}"))
            .await?;

        Ok(api_pr.into_pull_request())
    }

    // === Comment Operations ===

    /// List comments on an issue or pull request.
    ///
    /// # Errors
    /// Returns error if request fails.
    pub async fn list_issue_comments(
        &self,
        credential: &Credential,
        repo: &RepositoryRef,
        number: u64,
    ) -> Result<Vec<IssueComment>> {
        self.get(credential, &format!("/repos/{repo}/issues/{number}/comments"))
            .await
    }

    /// Create a comment on an issue or pull request.
    ///
    /// # Errors
    /// Returns error if request fails.
    pub async fn create_issue_comment(
        &self,
        credential: &Credential,
        repo: &RepositoryRef,
        number: u64,
        comment: CreateComment,
    ) -> Result<IssueComment> {
        self.post(
            credential,
            &format!("/repos/{repo}/issues/{number}/comments"),
            &comment,
        )
        .await
    }

    /// Update a comment on an issue or pull request.
    ///
    /// # Errors
    /// Returns error if request fails.
    pub async fn update_issue_comment(
        &self,
        credential: &Credential,
        repo: &RepositoryRef,
        comment_id: u64,
        comment: UpdateComment,
    ) -> Result<IssueComment> {
        self.patch(
            credential,
            &format!("/repos/{repo}/issues/comments/{comment_id}"),
            &comment,
        )
        .await
    }

    // === Status Operations ===

    /// Create a commit status for a SHA.
    ///
    /// # Errors
    /// Returns error if request fails.
    pub async fn create_commit_status(
        &self,
        credential: &Credential,
        repo: &RepositoryRef,
        sha: &str,
        status: CreateCommitStatus,
    ) -> Result<CommitStatus> {
        self.post(credential, &format!("/repos/{repo}/statuses/{sha}"), &status)
            .await
    }
}

impl std::fmt::Debug for GitHubClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

/// Pull the `message` field out of an error body, falling back to the raw text.
fn api_message(body: &str) -> String {
    serde_json::from_str::<ApiMessage>(body)
        .map_or_else(|_| body.trim().to_string(), |m| m.message)
}

// === Trait Implementation ===

impl GitHubApi for GitHubClient {
    async fn get_pr(
        &self,
        credential: &Credential,
        repo: &RepositoryRef,
        number: u64,
    ) -> Result<PullRequest> {
        self.get_pr(credential, repo, number).await
    }

    async fn list_issue_comments(
        &self,
        credential: &Credential,
        repo: &RepositoryRef,
        number: u64,
    ) -> Result<Vec<IssueComment>> {
        self.list_issue_comments(credential, repo, number).await
    }

    async fn create_issue_comment(
        &self,
        credential: &Credential,
        repo: &RepositoryRef,
        number: u64,
        comment: CreateComment,
    ) -> Result<IssueComment> {
        self.create_issue_comment(credential, repo, number, comment)
            .await
    }

    async fn update_issue_comment(
        &self,
        credential: &Credential,
        repo: &RepositoryRef,
        comment_id: u64,
        comment: UpdateComment,
    ) -> Result<IssueComment> {
        self.update_issue_comment(credential, repo, comment_id, comment)
            .await
    }

    async fn create_commit_status(
        &self,
        credential: &Credential,
        repo: &RepositoryRef,
        sha: &str,
        status: CreateCommitStatus,
    ) -> Result<CommitStatus> {
        self.create_commit_status(credential, repo, sha, status)
            .await
    }
}
