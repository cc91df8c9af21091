use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::git::GitLogError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configured path is not a git working tree")]
    InvalidRepository,

    #[error("Git log retrieval failed: {0}")]
    LogRetrieval(GitLogError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<GitLogError> for AppError {
    fn from(err: GitLogError) -> Self {
        match err {
            GitLogError::NotARepository(_) => AppError::InvalidRepository,
            other => AppError::LogRetrieval(other),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::InvalidRepository => (StatusCode::BAD_REQUEST, "Not a git repository"),
            AppError::LogRetrieval(e) => {
                tracing::error!("Error analyzing git history: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to analyze git history",
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to analyze git history",
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
