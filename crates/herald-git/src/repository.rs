//! Repository wrapper exposing what Herald needs from git.

use std::path::Path;

use crate::error::{Error, Result};

/// High-level wrapper around a git repository.
pub struct Repository {
    inner: git2::Repository,
}

impl Repository {
    /// Open a repository at the given path.
    ///
    /// # Errors
    /// Returns error if no repository found at path or any parent.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let inner = git2::Repository::discover(path)?;
        Ok(Self { inner })
    }

    /// Open the repository containing the current directory.
    ///
    /// # Errors
    /// Returns error if not inside a git repository.
    pub fn open_current() -> Result<Self> {
        Self::open(".")
    }

    /// Get the path to the repository root (workdir).
    #[must_use]
    pub fn workdir(&self) -> Option<&Path> {
        self.inner.workdir()
    }

    /// Get the URL of a remote.
    ///
    /// # Errors
    /// Returns error if the remote doesn't exist or has no URL.
    pub fn remote_url(&self, name: &str) -> Result<String> {
        let remote = self
            .inner
            .find_remote(name)
            .map_err(|_| Error::RemoteNotFound(name.into()))?;

        remote
            .url()
            .map(String::from)
            .ok_or_else(|| Error::RemoteNotFound(name.into()))
    }

    /// Get the URL of the `origin` remote.
    ///
    /// # Errors
    /// Returns error if there is no `origin` remote.
    pub fn origin_url(&self) -> Result<String> {
        self.remote_url("origin")
    }

    /// Split a GitHub remote URL into `(owner, repo)`.
    ///
    /// Accepts scp-style SSH (`git@github.com:owner/repo.git`), `ssh://`,
    /// `https://`, `http://` and `git://` URLs.
    ///
    /// # Errors
    /// Returns error if the URL has no `owner/repo` path.
    pub fn parse_github_remote(url: &str) -> Result<(String, String)> {
        let invalid = || Error::InvalidRemoteUrl(url.to_string());
        let trimmed = url.trim();

        let path = if let Some((_, rest)) = trimmed.split_once("://") {
            // Drop the authority (user@host:port).
            rest.split_once('/').map(|(_, path)| path).ok_or_else(invalid)?
        } else if let Some((host, path)) = trimmed.split_once(':') {
            if host.is_empty() || host.contains('/') {
                return Err(invalid());
            }
            path
        } else {
            return Err(invalid());
        };

        let path = path.trim_end_matches('/');
        let path = path.strip_suffix(".git").unwrap_or(path);

        let mut segments = path.split('/').filter(|s| !s.is_empty());
        match (segments.next(), segments.next(), segments.next()) {
            (Some(owner), Some(repo), None) => Ok((owner.to_string(), repo.to_string())),
            _ => Err(invalid()),
        }
    }
}

impl std::fmt::Debug for Repository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repository")
            .field("path", &self.inner.path())
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn init_test_repo() -> (TempDir, Repository) {
        let temp = TempDir::new().unwrap();
        let repo = git2::Repository::init(temp.path()).unwrap();
        (temp, Repository { inner: repo })
    }

    #[test]
    fn test_origin_url() {
        let (_temp, repo) = init_test_repo();
        repo.inner
            .remote("origin", "git@github.com:org/repo.git")
            .unwrap();

        assert_eq!(repo.origin_url().unwrap(), "git@github.com:org/repo.git");
    }

    #[test]
    fn test_missing_origin() {
        let (_temp, repo) = init_test_repo();
        assert!(matches!(repo.origin_url(), Err(Error::RemoteNotFound(_))));
    }

    #[test]
    fn test_open_discovers_from_subdirectory() {
        let (temp, _repo) = init_test_repo();
        let nested = temp.path().join("src").join("deep");
        std::fs::create_dir_all(&nested).unwrap();

        let repo = Repository::open(&nested).unwrap();
        assert!(repo.workdir().is_some());
    }

    #[test]
    fn test_open_outside_repository_fails() {
        let temp = TempDir::new().unwrap();
        // A fresh temp dir may still sit under a repo on some machines;
        // only assert when discovery fails.
        if let Err(err) = Repository::open(temp.path()) {
            assert!(matches!(err, Error::Git2(_)));
        }
    }

    #[test]
    fn test_parse_github_remote_variants() {
        let expected = ("org".to_string(), "repo".to_string());
        for url in [
            "git@github.com:org/repo.git",
            "git@github.com:org/repo",
            "ssh://git@github.com/org/repo.git",
            "ssh://git@github.com:22/org/repo",
            "https://github.com/org/repo.git",
            "https://github.com/org/repo/",
            "http://ghe.internal/org/repo",
            "git://github.com/org/repo.git",
        ] {
            assert_eq!(Repository::parse_github_remote(url).unwrap(), expected, "{url}");
        }
    }

    #[test]
    fn test_parse_github_remote_invalid() {
        for url in [
            "",
            "not a url",
            "https://github.com/org",
            "https://github.com/org/repo/tree/main",
            "/local/path/repo.git",
        ] {
            assert!(
                matches!(
                    Repository::parse_github_remote(url),
                    Err(Error::InvalidRemoteUrl(_))
                ),
                "{url}"
            );
        }
    }
}
