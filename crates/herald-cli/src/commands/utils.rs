use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result, bail};
use herald_core::config::CONFIG_FILE_NAME;
use herald_core::{CommentStatusClient, Config, TracingLogger};
use herald_git::Repository;
use herald_github::{Auth, Credential, GitHubClient, RepositoryRef};

use super::BodyArgs;

/// Environment variable GitHub Actions sets to `owner/name`.
const REPOSITORY_ENV: &str = "GITHUB_REPOSITORY";

/// Everything a command needs to talk to GitHub.
pub struct Session {
    pub client: CommentStatusClient<GitHubClient, TracingLogger>,
    pub credential: Credential,
    pub repo: RepositoryRef,
}

/// Load configuration from `path`, or from `.herald.toml` at the repository
/// root, then apply environment overrides.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let mut config = match path {
        Some(path) => {
            if !path.exists() {
                bail!("Config file not found: {}", path.display());
            }
            Config::load(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?
        }
        None => match discovered_config_path() {
            Some(path) => Config::load(&path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?,
            None => Config::default(),
        },
    };

    config.apply_env();
    Ok(config)
}

fn discovered_config_path() -> Option<std::path::PathBuf> {
    let repo = Repository::open_current().ok()?;
    repo.workdir().map(|w| w.join(CONFIG_FILE_NAME))
}

/// Work out which repository to act on.
///
/// Order: `--repo`, `$GITHUB_REPOSITORY`, the `origin` remote.
pub fn resolve_repo(flag: Option<&str>) -> Result<RepositoryRef> {
    if let Some(repo) = flag {
        return repo
            .parse()
            .with_context(|| format!("Invalid --repo value '{repo}'"));
    }

    if let Some(repo) = std::env::var(REPOSITORY_ENV)
        .ok()
        .filter(|r| !r.trim().is_empty())
    {
        return repo
            .parse()
            .with_context(|| format!("Invalid ${REPOSITORY_ENV} value '{repo}'"));
    }

    let git = Repository::open_current()
        .context("Not inside a git repository - pass --repo owner/name")?;
    let origin_url = git.origin_url()?;
    let (owner, name) =
        Repository::parse_github_remote(&origin_url).context("Could not parse GitHub remote URL")?;
    Ok(RepositoryRef::new(owner, name)?)
}

/// Resolve repository and credential and build the client.
pub fn connect(repo_flag: Option<&str>, config: &Config) -> Result<Session> {
    let repo = resolve_repo(repo_flag)?;
    let credential = Auth::auto()
        .resolve()
        .context("Failed to resolve GitHub credential")?;
    let api = GitHubClient::with_options(config.github.api_url(), &config.github.client_options())
        .context("Failed to build GitHub client")?;

    Ok(Session {
        client: CommentStatusClient::new(api, TracingLogger),
        credential,
        repo,
    })
}

/// Runtime for driving the async client from a sync command.
pub fn runtime() -> Result<tokio::runtime::Runtime> {
    tokio::runtime::Runtime::new().context("Failed to start async runtime")
}

impl BodyArgs {
    /// Read the body from the flag, a file, or stdin.
    pub fn read(&self) -> Result<String> {
        if let Some(body) = &self.body {
            return Ok(body.clone());
        }

        match self.body_file.as_deref() {
            Some(path) if path == Path::new("-") => {
                let mut body = String::new();
                std::io::stdin()
                    .read_to_string(&mut body)
                    .context("Failed to read comment body from stdin")?;
                Ok(body)
            }
            Some(path) => std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read comment body from {}", path.display())),
            None => bail!("No comment body given - use --body or --body-file"),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_repo_flag_wins() {
        let repo = resolve_repo(Some("org/repo")).unwrap();
        assert_eq!(repo.to_string(), "org/repo");
    }

    #[test]
    fn test_invalid_repo_flag() {
        let err = resolve_repo(Some("just-a-name")).unwrap_err();
        assert!(format!("{err:#}").contains("Invalid --repo value"));
    }

    #[test]
    fn test_body_inline() {
        let args = BodyArgs {
            body: Some("inline".into()),
            body_file: None,
        };
        assert_eq!(args.read().unwrap(), "inline");
    }

    #[test]
    fn test_body_from_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("body.md");
        std::fs::write(&path, "## Report\nAll good\n").unwrap();

        let args = BodyArgs {
            body: None,
            body_file: Some(path),
        };
        assert_eq!(args.read().unwrap(), "## Report\nAll good\n");
    }

    #[test]
    fn test_body_file_missing() {
        let args = BodyArgs {
            body: None,
            body_file: Some("/nonexistent/body.md".into()),
        };
        assert!(args.read().is_err());
    }

    #[test]
    fn test_explicit_config_must_exist() {
        let err = load_config(Some(Path::new("/nonexistent/herald.toml"))).unwrap_err();
        assert!(err.to_string().contains("Config file not found"));
    }

    #[test]
    fn test_explicit_config_loaded() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("herald.toml");
        std::fs::write(&path, "[status]\ncontext = \"ci/test\"\n").unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.status.context, "ci/test");
    }
}
