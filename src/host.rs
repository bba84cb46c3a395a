//! Console implementations of the host ports used by the binary.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

use crate::freshness::LAST_UPDATE_ELEMENT;
use crate::ports::{DisplaySurface, NotificationLevel, Notifier, RenderHooks, SharedState};

pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, message: &str, level: NotificationLevel) {
        match level {
            NotificationLevel::Warning => warn!(target: "notification", "{}", message),
            NotificationLevel::Info | NotificationLevel::Success => {
                info!(target: "notification", "{}", message)
            }
        }
    }
}

/// Prints the last-update element to stdout.
pub struct ConsoleDisplay;

impl DisplaySurface for ConsoleDisplay {
    fn set_text(&self, element_id: &str, text: &str) -> bool {
        if element_id != LAST_UPDATE_ELEMENT {
            return false;
        }
        println!("{}", text);
        true
    }
}

/// Render pipeline of the CLI host: the loaded sources are "rendered" as a
/// pretty-printed JSON snapshot.
pub struct SnapshotRenderer {
    state: SharedState,
    output: Option<PathBuf>,
}

impl SnapshotRenderer {
    pub fn new(state: SharedState, output: Option<PathBuf>) -> Self {
        SnapshotRenderer { state, output }
    }

    fn write_snapshot(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.state.sources_json())
            .context("Failed to serialize sources")?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write snapshot to {}", path.display()))?;
        Ok(())
    }
}

impl RenderHooks for SnapshotRenderer {
    fn update_sources(&self) {
        debug!("Sources updated");
    }

    fn aggregate_data(&self) {
        let sources = self.state.sources_json();
        debug!(
            "Aggregating {} source(s)",
            sources.as_object().map_or(0, |o| o.len())
        );
    }

    fn render(&self) {
        let Some(path) = &self.output else {
            return;
        };
        match self.write_snapshot(path) {
            Ok(()) => info!("Snapshot written to {}", path.display()),
            Err(e) => error!("{:#}", e),
        }
    }
}
