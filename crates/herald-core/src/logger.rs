//! Logging capability used by [`crate::CommentStatusClient`].
//!
//! The client never configures a sink. It receives a [`Logger`] at
//! construction and emits one event per outcome through it.

use herald_github::Error;

/// Sink for the client's outcome events.
pub trait Logger: Send + Sync {
    /// An operation succeeded.
    fn info(&self, message: &str);

    /// An operation failed with `error`.
    fn error(&self, error: &Error, message: &str);
}

/// [`Logger`] backed by `tracing` events under the `herald` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn info(&self, message: &str) {
        tracing::info!(target: "herald", "{message}");
    }

    fn error(&self, error: &Error, message: &str) {
        tracing::error!(
            target: "herald",
            error = %error,
            kind = ?error.kind(),
            "{message}"
        );
    }
}

impl<T: Logger + ?Sized> Logger for std::sync::Arc<T> {
    fn info(&self, message: &str) {
        (**self).info(message);
    }

    fn error(&self, error: &Error, message: &str) {
        (**self).error(error, message);
    }
}
