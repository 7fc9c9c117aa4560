//! Error types for herald-github.

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during GitHub API operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Token not found.
    #[error("no GitHub token found - run `gh auth login` or set GITHUB_TOKEN")]
    NoToken,

    /// Credential rejected or missing the required scope.
    #[error("GitHub authentication failed ({status}): {message}")]
    AuthenticationFailed { status: u16, message: String },

    /// API rate limit exceeded.
    #[error("GitHub API rate limit exceeded - wait and try again")]
    RateLimited,

    /// Pull request, comment or commit does not exist or is not accessible.
    #[error("not found: {0}")]
    NotFound(String),

    /// The pull request was fetched but carries no head commit SHA.
    #[error("pull request #{0} has no head commit SHA")]
    MissingHeadSha(u64),

    /// Any other non-success response.
    #[error("GitHub API error ({status}): {message}")]
    ApiError { status: u16, message: String },

    /// Caller supplied an argument the API would reject.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Network error.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// JSON parsing error.
    #[error("failed to parse GitHub response: {0}")]
    Parse(#[from] serde_json::Error),

    /// IO error (e.g., reading gh CLI token).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Coarse classification of an [`Error`], for callers deciding whether to
/// retry, re-authenticate or give up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The API could not be reached.
    Transport,
    /// The credential is missing, rejected or under-scoped.
    Auth,
    /// The API asked us to slow down.
    RateLimited,
    /// The referenced resource does not exist or is inaccessible.
    NotFound,
    /// A pull request without a resolvable head SHA.
    MissingHeadSha,
    /// Malformed or unrecognized response.
    UnexpectedResponse,
    /// Rejected before any request was made.
    InvalidInput,
}

impl Error {
    /// Classify this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Network(_) | Self::Io(_) => ErrorKind::Transport,
            Self::NoToken | Self::AuthenticationFailed { .. } => ErrorKind::Auth,
            Self::RateLimited => ErrorKind::RateLimited,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::MissingHeadSha(_) => ErrorKind::MissingHeadSha,
            Self::ApiError { .. } | Self::Parse(_) => ErrorKind::UnexpectedResponse,
            Self::InvalidInput(_) => ErrorKind::InvalidInput,
        }
    }
}
