use std::collections::HashMap;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};

/// One non-merge commit as reported by the commit log source.
///
/// `timestamp` is kept as the source's textual form (strict ISO-8601 with
/// offset) and is never parsed by the aggregation path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRecord {
    pub author_email: String,
    pub timestamp: String,
}

impl CommitRecord {
    pub fn new(author_email: impl Into<String>, timestamp: impl Into<String>) -> Self {
        Self {
            author_email: author_email.into(),
            timestamp: timestamp.into(),
        }
    }
}

/// Per-author accumulator built by the aggregator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorActivity {
    pub commit_count: u32,
    /// Timestamp of the first record seen for the author (most recent commit).
    pub last_commit: String,
    /// Timestamp of the last record seen for the author (oldest commit).
    pub first_commit: String,
}

/// Insertion-ordered map of author email to activity.
///
/// Iteration yields authors in the order they first appeared in the input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivityMap {
    entries: Vec<(String, AuthorActivity)>,
    index: HashMap<String, usize>,
}

impl ActivityMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[cfg(test)]
    pub fn get(&self, email: &str) -> Option<&AuthorActivity> {
        self.index.get(email).map(|&i| &self.entries[i].1)
    }

    /// Returns the accumulator for `email`, creating it at the end of the
    /// iteration order from `init` if absent.
    pub fn entry_or_insert_with(
        &mut self,
        email: &str,
        init: impl FnOnce() -> AuthorActivity,
    ) -> &mut AuthorActivity {
        let idx = match self.index.get(email) {
            Some(&i) => i,
            None => {
                self.entries.push((email.to_string(), init()));
                let i = self.entries.len() - 1;
                self.index.insert(email.to_string(), i);
                i
            }
        };
        &mut self.entries[idx].1
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AuthorActivity)> {
        self.entries.iter().map(|(email, a)| (email.as_str(), a))
    }
}

/// The `[start, end]` bound of one team-activity query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ActivityWindow {
    #[serde(serialize_with = "serialize_iso_millis")]
    pub start: DateTime<Utc>,
    #[serde(serialize_with = "serialize_iso_millis")]
    pub end: DateTime<Utc>,
}

/// Renders as `2024-01-03T00:00:00.000Z`.
fn serialize_iso_millis<S: Serializer>(dt: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&dt.to_rfc3339_opts(SecondsFormat::Millis, true))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamActivityEntry {
    pub email: String,
    pub total_commits: u32,
    pub first_commit: String,
    pub last_commit: String,
}

/// Response body of `GET /api/team-activity`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityReport {
    pub period: ActivityWindow,
    pub team_activity: Vec<TeamActivityEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_activity_map_keeps_first_occurrence_order() {
        let mut map = ActivityMap::new();
        for email in ["b@x.com", "a@x.com", "b@x.com", "c@x.com"] {
            map.entry_or_insert_with(email, || AuthorActivity {
                commit_count: 0,
                last_commit: String::new(),
                first_commit: String::new(),
            })
            .commit_count += 1;
        }

        let order: Vec<&str> = map.iter().map(|(e, _)| e).collect();
        assert_eq!(order, vec!["b@x.com", "a@x.com", "c@x.com"]);
        assert_eq!(map.get("b@x.com").map(|a| a.commit_count), Some(2));
        assert_eq!(map.len(), 3);
    }

    #[test]
    fn test_report_serializes_camel_case_with_iso_period() {
        let report = ActivityReport {
            period: ActivityWindow {
                start: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
                end: Utc.with_ymd_and_hms(2024, 1, 31, 12, 30, 0).unwrap(),
            },
            team_activity: vec![TeamActivityEntry {
                email: "a@x.com".to_string(),
                total_commits: 1,
                first_commit: "2024-01-02T00:00:00Z".to_string(),
                last_commit: "2024-01-02T00:00:00Z".to_string(),
            }],
        };

        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(
            value,
            json!({
                "period": {
                    "start": "2024-01-01T00:00:00.000Z",
                    "end": "2024-01-31T12:30:00.000Z"
                },
                "teamActivity": [{
                    "email": "a@x.com",
                    "totalCommits": 1,
                    "firstCommit": "2024-01-02T00:00:00Z",
                    "lastCommit": "2024-01-02T00:00:00Z"
                }]
            })
        );
    }
}
