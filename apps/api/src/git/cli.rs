use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::process::Command;
use tracing::{debug, warn};

use crate::activity::models::CommitRecord;
use crate::git::{CommitLogSource, GitLogError};

/// Separates fields in the `git log` pretty format (ASCII unit separator).
const FIELD_SEP: char = '\x1f';
/// Mailmap-aware author email, then strict ISO-8601 author date.
const LOG_FORMAT: &str = "--format=%aE%x1f%aI";
/// Whole-second date form git's `--since` parser reads unambiguously.
const SINCE_FORMAT: &str = "%Y-%m-%d %H:%M:%S %z";

/// Reads commit history by running the `git` CLI inside a working tree.
#[derive(Debug, Clone)]
pub struct GitCliSource {
    repo_path: PathBuf,
    timeout: Duration,
}

impl GitCliSource {
    pub fn new(repo_path: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            repo_path: repo_path.into(),
            timeout,
        }
    }

    pub fn repo_path(&self) -> &Path {
        &self.repo_path
    }

    /// Runs `git --no-pager <args>` in the repository and returns stdout.
    async fn run_git(&self, args: &[String]) -> Result<String, GitLogError> {
        let mut cmd = Command::new("git");
        cmd.current_dir(&self.repo_path)
            .arg("--no-pager")
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        debug!("Running git {:?} in {}", args, self.repo_path.display());

        let output = tokio::time::timeout(self.timeout, cmd.output())
            .await
            .map_err(|_| GitLogError::Timeout {
                secs: self.timeout.as_secs(),
            })??;

        if !output.status.success() {
            return Err(GitLogError::CommandFailed {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// Fails with `NotARepository` unless the path is inside a git work tree.
    async fn ensure_work_tree(&self) -> Result<(), GitLogError> {
        if !self.repo_path.is_dir() {
            return Err(GitLogError::NotARepository(self.repo_path.clone()));
        }

        let args = ["rev-parse".to_string(), "--is-inside-work-tree".to_string()];
        match self.run_git(&args).await {
            Ok(out) if out.trim() == "true" => Ok(()),
            // Bare repositories print "false"; rev-parse exits non-zero outside a repo.
            Ok(_) | Err(GitLogError::CommandFailed { .. }) => {
                Err(GitLogError::NotARepository(self.repo_path.clone()))
            }
            Err(e) => Err(e),
        }
    }

    /// False while HEAD is unborn, i.e. the work tree has no commits yet.
    async fn has_commits(&self) -> Result<bool, GitLogError> {
        let args = ["rev-parse", "--verify", "-q", "HEAD"].map(String::from);
        match self.run_git(&args).await {
            Ok(_) => Ok(true),
            Err(GitLogError::CommandFailed { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }
}

#[async_trait]
impl CommitLogSource for GitCliSource {
    async fn fetch_since(
        &self,
        since: DateTime<Utc>,
        exclude_merges: bool,
    ) -> Result<Vec<CommitRecord>, GitLogError> {
        self.ensure_work_tree().await?;
        if !self.has_commits().await? {
            debug!("{} has no commits yet", self.repo_path.display());
            return Ok(Vec::new());
        }

        let mut args = vec![
            "log".to_string(),
            format!("--since={}", since.format(SINCE_FORMAT)),
            LOG_FORMAT.to_string(),
        ];
        if exclude_merges {
            args.push("--no-merges".to_string());
        }

        let stdout = self.run_git(&args).await?;
        let commits = parse_log_output(&stdout)?;

        let out_of_order = count_out_of_order(&commits);
        if out_of_order > 0 {
            warn!(
                "{} commit pair(s) in {} are not in descending author-date order; \
                 first/last commit bounds may be approximate",
                out_of_order,
                self.repo_path.display()
            );
        }

        Ok(commits)
    }
}

/// Parses `LOG_FORMAT` output, one commit per non-blank line.
fn parse_log_output(stdout: &str) -> Result<Vec<CommitRecord>, GitLogError> {
    stdout
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            let (email, timestamp) = line
                .split_once(FIELD_SEP)
                .ok_or_else(|| GitLogError::MalformedOutput(line.to_string()))?;
            let timestamp = timestamp.trim();
            if timestamp.is_empty() {
                return Err(GitLogError::MalformedOutput(line.to_string()));
            }
            Ok(CommitRecord::new(email, timestamp))
        })
        .collect()
}

/// Adjacent pairs whose timestamps increase. Unparseable timestamps are skipped.
fn count_out_of_order(commits: &[CommitRecord]) -> usize {
    commits
        .windows(2)
        .filter(|pair| {
            match (
                DateTime::parse_from_rfc3339(&pair[0].timestamp),
                DateTime::parse_from_rfc3339(&pair[1].timestamp),
            ) {
                (Ok(newer), Ok(older)) => newer < older,
                _ => false,
            }
        })
        .count()
}
