use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::error;

use super::client::{FetchError, GitHubClient};

/// Read side of the remote data store.
///
/// Every failure is absorbed here: callers only ever see a value or `None`.
#[async_trait]
pub trait DataStore: Send + Sync {
    /// Parsed contents of `data/{filename}`, or `None` on any failure.
    async fn fetch(&self, filename: &str) -> Option<serde_json::Value>;

    /// Author date of the newest commit touching the data directory.
    async fn last_update_time(&self) -> Option<DateTime<Utc>>;

    /// Human-readable name for logging.
    fn name(&self) -> &str;
}

#[async_trait]
impl DataStore for GitHubClient {
    fn name(&self) -> &str {
        "GitHub"
    }

    async fn fetch(&self, filename: &str) -> Option<serde_json::Value> {
        match self.fetch_data_file(filename).await {
            Ok(value) => Some(value),
            Err(e) => {
                error!("Error fetching {}: {}", filename, e);
                None
            }
        }
    }

    async fn last_update_time(&self) -> Option<DateTime<Utc>> {
        match self.latest_commit().await {
            Ok(record) => record.map(|r| r.authored_at),
            // An unauthorised or missing repository just means "unknown"
            Err(FetchError::Status(_)) => None,
            Err(e) => {
                error!("Error getting last update time: {}", e);
                None
            }
        }
    }
}
