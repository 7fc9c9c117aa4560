//! # herald-git
//!
//! Repository discovery for Herald, built on git2-rs: find the enclosing
//! repository and work out which GitHub repository its `origin` points at.

mod error;
mod repository;

pub use error::{Error, Result};
pub use repository::Repository;
