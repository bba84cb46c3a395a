use chrono::{DateTime, Utc};
use serde::Deserialize;

/// One element of `GET /repos/{owner}/{repo}/commits`
#[derive(Debug, Clone, Deserialize)]
pub struct CommitEntry {
    pub commit: CommitDetail,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommitDetail {
    pub author: CommitAuthor,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommitAuthor {
    pub date: DateTime<Utc>,
}

/// Most recent change to the `data/` path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommitRecord {
    pub authored_at: DateTime<Utc>,
}

impl From<CommitEntry> for CommitRecord {
    fn from(entry: CommitEntry) -> Self {
        CommitRecord {
            authored_at: entry.commit.author.date,
        }
    }
}

/// Number of players in a projection payload: top-level keys of an object,
/// elements of an array, zero for anything else.
pub fn player_count(payload: &serde_json::Value) -> usize {
    match payload {
        serde_json::Value::Object(map) => map.len(),
        serde_json::Value::Array(items) => items.len(),
        _ => 0,
    }
}
