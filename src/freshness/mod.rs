//! Data freshness: when did the newest commit land in `data/`, and how long
//! ago was that in words.

pub mod time_ago;

use time_ago::time_ago;

use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::info;

use crate::github::DataStore;
use crate::ports::DisplaySurface;

/// Element that receives the "Last updated" text
pub const LAST_UPDATE_ELEMENT: &str = "lastUpdateTime";

#[derive(Clone)]
pub struct FreshnessReporter {
    store: Arc<dyn DataStore>,
    display: Arc<dyn DisplaySurface>,
}

impl FreshnessReporter {
    pub fn new(store: Arc<dyn DataStore>, display: Arc<dyn DisplaySurface>) -> Self {
        FreshnessReporter { store, display }
    }

    pub async fn get_last_update_time(&self) -> Option<DateTime<Utc>> {
        self.store.last_update_time().await
    }

    /// Write "Last updated: …" to the display and return the age text.
    /// Does nothing when the store has no commit information.
    pub async fn show_last_update_time(&self) -> Option<String> {
        let last_update = self.get_last_update_time().await?;
        let ago = time_ago(last_update, Utc::now());
        self.display
            .set_text(LAST_UPDATE_ELEMENT, &format!("Last updated: {}", ago));
        info!("📅 Data last updated: {}", ago);
        Some(ago)
    }
}
