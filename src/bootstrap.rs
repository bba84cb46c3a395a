use futures_util::future::join;
use tracing::{info, warn};

use crate::config::Config;
use crate::freshness::FreshnessReporter;
use crate::loader::{DataLoader, LoadOutcome};
use crate::ports::StateHandle;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InitOutcome {
    /// Account still on its placeholder; no request was made
    NotConfigured,
    Initialized {
        load: LoadOutcome,
        last_update: Option<String>,
    },
}

/// Page-load entry point wiring the loader and the freshness reporter.
pub struct Integration {
    config: Config,
    loader: DataLoader,
    reporter: FreshnessReporter,
}

impl Integration {
    pub fn new(config: Config, loader: DataLoader, reporter: FreshnessReporter) -> Self {
        Integration {
            config,
            loader,
            reporter,
        }
    }

    pub fn loader(&self) -> &DataLoader {
        &self.loader
    }

    pub fn reporter(&self) -> &FreshnessReporter {
        &self.reporter
    }

    /// Load the current sport's data and show the last update time.
    ///
    /// The two run concurrently and neither waits on the other.
    pub async fn initialize(&self, state: &dyn StateHandle) -> InitOutcome {
        if !self.config.is_configured() {
            warn!(
                "⚠️ GitHub integration not configured. Set GITHUB_USERNAME, GITHUB_REPO and GITHUB_TOKEN."
            );
            return InitOutcome::NotConfigured;
        }

        let pending = self.config.placeholder_fields();
        if !pending.is_empty() {
            warn!("Still using placeholder values for: {:?}", pending);
        }

        info!(
            "✅ GitHub integration initialized ({}/{}@{})",
            self.config.github_username, self.config.github_repo, self.config.github_branch
        );

        let (load, last_update) = join(
            self.loader.auto_load(state),
            self.reporter.show_last_update_time(),
        )
        .await;

        InitOutcome::Initialized { load, last_update }
    }
}
