//! Commit log retrieval.
//!
//! `CommitLogSource` is the seam between the HTTP layer and version control.
//! `AppState` carries an `Arc<dyn CommitLogSource>`; the default backend is
//! `GitCliSource`, which shells out to the `git` binary.

use std::path::PathBuf;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::activity::models::CommitRecord;

pub mod cli;

pub use cli::GitCliSource;

#[derive(Debug, Error)]
pub enum GitLogError {
    #[error("Not a git repository: {}", .0.display())]
    NotARepository(PathBuf),

    #[error("Failed to run git: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("git exited with {status}: {stderr}")]
    CommandFailed { status: String, stderr: String },

    #[error("git log did not finish within {secs}s")]
    Timeout { secs: u64 },

    #[error("Unexpected git log line: {0:?}")]
    MalformedOutput(String),
}

/// Supplies the commits of one repository made after `since`, ordered
/// most-recent-first.
///
/// Implementations must return `GitLogError::NotARepository` when the target
/// is not a working tree, and an empty vector (not an error) when the window
/// holds no commits.
#[async_trait]
pub trait CommitLogSource: Send + Sync {
    async fn fetch_since(
        &self,
        since: DateTime<Utc>,
        exclude_merges: bool,
    ) -> Result<Vec<CommitRecord>, GitLogError>;
}
