//! # herald-core
//!
//! Core library for Herald: the [`CommentStatusClient`] that publishes pull
//! request comments and commit statuses, the [`Logger`] capability it reports
//! through, and the configuration file model.

pub mod config;
pub mod error;
pub mod logger;
pub mod service;

#[cfg(test)]
mod test_mocks;

pub use config::Config;
pub use error::{Error, Result};
pub use logger::{Logger, TracingLogger};
pub use service::{API_ERROR_MESSAGE, CommentStatusClient, CommitStatusRequest, SyncOutcome};
