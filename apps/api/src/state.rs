use std::sync::Arc;

use crate::config::Config;
use crate::git::CommitLogSource;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Pluggable commit history backend. Default: `GitCliSource` over `config.repo_path`.
    pub commit_source: Arc<dyn CommitLogSource>,
}
