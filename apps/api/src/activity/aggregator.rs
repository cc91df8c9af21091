//! Team activity aggregation — folds a commit log into per-author summaries.

use crate::activity::models::{ActivityMap, AuthorActivity, CommitRecord};

/// Groups `commits` by author email, counting commits and recording the
/// latest and earliest timestamps per author.
///
/// Precondition: `commits` is ordered most-recent-first (git's native log
/// order). No sorting or timestamp comparison happens here:
/// - `last_commit` is the timestamp of the author's first record and is
///   never overwritten;
/// - `first_commit` is overwritten on every record, so it ends on the
///   author's last record.
///
/// Authors appear in the result in first-occurrence order. Emails are
/// compared verbatim (case-sensitive).
pub fn aggregate(commits: &[CommitRecord]) -> ActivityMap {
    let mut activity = ActivityMap::new();

    for commit in commits {
        let author = activity.entry_or_insert_with(&commit.author_email, || AuthorActivity {
            commit_count: 0,
            last_commit: commit.timestamp.clone(),
            first_commit: commit.timestamp.clone(),
        });
        author.commit_count += 1;
        author.first_commit.clone_from(&commit.timestamp);
    }

    activity
}

#[cfg(test)]
mod tests {
    use super::*;

    fn commit(email: &str, ts: &str) -> CommitRecord {
        CommitRecord::new(email, ts)
    }

    #[test]
    fn test_empty_log_yields_empty_map() {
        let activity = aggregate(&[]);
        assert!(activity.is_empty());
    }

    #[test]
    fn test_single_author_descending_log() {
        let commits = vec![
            commit("a@x.com", "2024-01-05T00:00:00Z"),
            commit("a@x.com", "2024-01-04T00:00:00Z"),
            commit("a@x.com", "2024-01-03T00:00:00Z"),
            commit("a@x.com", "2024-01-01T00:00:00Z"),
        ];

        let activity = aggregate(&commits);
        let a = activity.get("a@x.com").unwrap();
        assert_eq!(activity.len(), 1);
        assert_eq!(a.commit_count, 4);
        assert_eq!(a.last_commit, "2024-01-05T00:00:00Z");
        assert_eq!(a.first_commit, "2024-01-01T00:00:00Z");
    }

    #[test]
    fn test_single_commit_sets_both_bounds() {
        let activity = aggregate(&[commit("b@x.com", "2024-01-02T00:00:00Z")]);
        let b = activity.get("b@x.com").unwrap();
        assert_eq!(b.commit_count, 1);
        assert_eq!(b.last_commit, b.first_commit);
    }

    #[test]
    fn test_interleaved_authors_are_independent() {
        let commits = vec![
            commit("a@x.com", "2024-01-06T00:00:00Z"),
            commit("b@x.com", "2024-01-05T00:00:00Z"),
            commit("a@x.com", "2024-01-04T00:00:00Z"),
            commit("b@x.com", "2024-01-03T00:00:00Z"),
            commit("b@x.com", "2024-01-02T00:00:00Z"),
            commit("a@x.com", "2024-01-01T00:00:00Z"),
        ];

        let activity = aggregate(&commits);
        assert_eq!(activity.len(), 2);

        let a = activity.get("a@x.com").unwrap();
        assert_eq!(a.commit_count, 3);
        assert_eq!(a.last_commit, "2024-01-06T00:00:00Z");
        assert_eq!(a.first_commit, "2024-01-01T00:00:00Z");

        let b = activity.get("b@x.com").unwrap();
        assert_eq!(b.commit_count, 3);
        assert_eq!(b.last_commit, "2024-01-05T00:00:00Z");
        assert_eq!(b.first_commit, "2024-01-02T00:00:00Z");
    }

    #[test]
    fn test_authors_listed_in_first_occurrence_order() {
        let commits = vec![
            commit("c@x.com", "2024-01-04T00:00:00Z"),
            commit("a@x.com", "2024-01-03T00:00:00Z"),
            commit("c@x.com", "2024-01-02T00:00:00Z"),
            commit("b@x.com", "2024-01-01T00:00:00Z"),
        ];

        let activity = aggregate(&commits);
        let order: Vec<&str> = activity.iter().map(|(e, _)| e).collect();
        assert_eq!(order, vec!["c@x.com", "a@x.com", "b@x.com"]);
    }

    #[test]
    fn test_email_grouping_is_case_sensitive() {
        let commits = vec![
            commit("Dev@x.com", "2024-01-02T00:00:00Z"),
            commit("dev@x.com", "2024-01-01T00:00:00Z"),
        ];

        let activity = aggregate(&commits);
        assert_eq!(activity.len(), 2);
        assert_eq!(activity.get("Dev@x.com").unwrap().commit_count, 1);
        assert_eq!(activity.get("dev@x.com").unwrap().commit_count, 1);
    }

    #[test]
    fn test_out_of_order_input_is_not_resorted() {
        // Ascending input: bounds follow position, not chronology.
        let commits = vec![
            commit("a@x.com", "2024-01-01T00:00:00Z"),
            commit("a@x.com", "2024-01-09T00:00:00Z"),
        ];

        let a = aggregate(&commits).get("a@x.com").cloned().unwrap();
        assert_eq!(a.last_commit, "2024-01-01T00:00:00Z");
        assert_eq!(a.first_commit, "2024-01-09T00:00:00Z");
    }

    #[test]
    fn test_malformed_timestamps_pass_through() {
        let a = aggregate(&[commit("a@x.com", "not-a-date")])
            .get("a@x.com")
            .cloned()
            .unwrap();
        assert_eq!(a.first_commit, "not-a-date");
        assert_eq!(a.last_commit, "not-a-date");
    }
}
