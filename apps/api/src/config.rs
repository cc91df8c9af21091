use std::path::PathBuf;

use anyhow::{ensure, Context, Result};

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Working tree whose history is analysed.
    pub repo_path: PathBuf,
    pub port: u16,
    pub git_timeout_secs: u64,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let git_timeout_secs = env_or("GIT_LOG_TIMEOUT_SECS", "30")
            .parse::<u64>()
            .context("GIT_LOG_TIMEOUT_SECS must be a whole number of seconds")?;
        ensure!(git_timeout_secs > 0, "GIT_LOG_TIMEOUT_SECS must be greater than 0");

        Ok(Config {
            repo_path: PathBuf::from(env_or("GIT_REPO_PATH", ".")),
            port: env_or("PORT", "3000")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            git_timeout_secs,
            rust_log: env_or("RUST_LOG", "info"),
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
