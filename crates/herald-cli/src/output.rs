//! Terminal output formatting utilities.

use std::sync::atomic::{AtomicBool, Ordering};

use colored::Colorize;
use herald_github::{CommitStatusState, IssueComment};

static QUIET_MODE: AtomicBool = AtomicBool::new(false);

/// Set quiet mode globally. Call once at startup.
pub fn set_quiet(quiet: bool) {
    QUIET_MODE.store(quiet, Ordering::Relaxed);
}

fn is_quiet() -> bool {
    QUIET_MODE.load(Ordering::Relaxed)
}

/// Print a success message (suppressed in quiet mode).
pub fn success(msg: &str) {
    if !is_quiet() {
        println!("{} {}", "✓".green(), msg);
    }
}

/// Print an error message (always prints to stderr).
pub fn error(msg: &str) {
    eprintln!("{} {}", "✗".red(), msg);
}

/// Print an info message (suppressed in quiet mode).
pub fn info(msg: &str) {
    if !is_quiet() {
        println!("{} {}", "→".blue(), msg);
    }
}

/// Print a detail line without prefix (suppressed in quiet mode).
pub fn detail(msg: &str) {
    if !is_quiet() {
        println!("{msg}");
    }
}

/// Print essential machine-readable output (always prints).
///
/// Use for results that should be available for piping, like comment URLs.
pub fn essential(msg: &str) {
    println!("{msg}");
}

/// Colored label for a commit status state.
#[must_use]
pub fn state_label(state: CommitStatusState) -> String {
    match state {
        CommitStatusState::Success => state.as_str().green().to_string(),
        CommitStatusState::Pending => state.as_str().yellow().to_string(),
        CommitStatusState::Failure | CommitStatusState::Error => {
            state.as_str().red().to_string()
        }
    }
}

/// One-line heading for a comment: id, author and last update.
#[must_use]
pub fn comment_heading(comment: &IssueComment) -> String {
    let author = comment
        .user
        .as_ref()
        .map_or("unknown", |u| u.login.as_str());
    let when = comment
        .updated_at
        .or(comment.created_at)
        .map(|t| t.format("%Y-%m-%d %H:%M UTC").to_string())
        .unwrap_or_default();

    format!("{} {} {}", format!("#{}", comment.id).cyan(), author.bold(), when.dimmed())
        .trim_end()
        .to_string()
}

/// Print a horizontal line (suppressed in quiet mode).
pub fn hr() {
    if !is_quiet() {
        println!("{}", "─".repeat(50).dimmed());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use herald_github::CommentAuthor;

    fn comment() -> IssueComment {
        IssueComment {
            id: 42,
            body: Some("hello".into()),
            html_url: None,
            user: Some(CommentAuthor {
                login: "octocat".into(),
            }),
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn state_label_colors_match_state() {
        colored::control::set_override(true);

        assert_eq!(
            state_label(CommitStatusState::Success),
            "success".green().to_string()
        );
        assert_eq!(
            state_label(CommitStatusState::Pending),
            "pending".yellow().to_string()
        );
        assert_eq!(
            state_label(CommitStatusState::Failure),
            "failure".red().to_string()
        );

        colored::control::set_override(false);
    }

    #[test]
    fn test_comment_heading() {
        let heading = comment_heading(&comment());
        assert!(heading.contains("#42"));
        assert!(heading.contains("octocat"));
    }

    #[test]
    fn test_comment_heading_unknown_author() {
        let mut c = comment();
        c.user = None;
        assert!(comment_heading(&c).contains("unknown"));
    }

    #[test]
    fn test_quiet_mode_enabled() {
        set_quiet(true);
        assert!(is_quiet());
        // Reset
        set_quiet(false);
        assert!(!is_quiet());
    }
}
