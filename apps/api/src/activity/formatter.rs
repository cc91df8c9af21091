use crate::activity::models::{ActivityMap, ActivityReport, ActivityWindow, TeamActivityEntry};

/// Builds the response body from an aggregated map, keeping the map's author
/// order. An empty map produces an empty `teamActivity` list.
pub fn format_report(activity: &ActivityMap, window: ActivityWindow) -> ActivityReport {
    let team_activity = activity
        .iter()
        .map(|(email, author)| TeamActivityEntry {
            email: email.to_string(),
            total_commits: author.commit_count,
            first_commit: author.first_commit.clone(),
            last_commit: author.last_commit.clone(),
        })
        .collect();

    ActivityReport {
        period: window,
        team_activity,
    }
}
