//! Axum route handlers for the team activity API.

use anyhow::anyhow;
use axum::{
    extract::{Query, State},
    Json,
};
use chrono::Utc;
use tracing::{debug, info};

use crate::activity::aggregator::aggregate;
use crate::activity::formatter::format_report;
use crate::activity::models::{ActivityReport, ActivityWindow};
use crate::activity::window::{parse_days, window_start};
use crate::errors::AppError;
use crate::state::AppState;

/// First `days` value of the query string, if any.
///
/// Parameters are taken as raw pairs so repeated or non-numeric values never
/// reject the request (`?days=7&days=8` reads as 7).
fn first_days_param(params: &[(String, String)]) -> Option<&str> {
    params
        .iter()
        .find(|(key, _)| key == "days")
        .map(|(_, value)| value.as_str())
}

/// GET /api/team-activity?days=<n>
///
/// Pipeline: parse window → fetch non-merge commits since start → aggregate
/// per author → format. `end` is stamped after aggregation.
pub async fn handle_team_activity(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<ActivityReport>, AppError> {
    let days = parse_days(first_days_param(&params));
    let since = window_start(Utc::now(), days)
        .ok_or_else(|| anyhow!("A {days}-day activity window is out of range"))?;

    let commits = state.commit_source.fetch_since(since, true).await?;
    let activity = aggregate(&commits);
    if activity.is_empty() {
        debug!("No non-merge commits since {since}");
    }

    info!(
        "Team activity for {}: {} commits by {} authors over {} days",
        state.config.repo_path.display(),
        commits.len(),
        activity.len(),
        days
    );

    let window = ActivityWindow {
        start: since,
        end: Utc::now(),
    };
    Ok(Json(format_report(&activity, window)))
}
