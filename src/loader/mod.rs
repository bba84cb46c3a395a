pub mod sport;

pub use sport::Sport;

use std::sync::Arc;
use tracing::{info, warn};

use crate::github::models::player_count;
use crate::github::DataStore;
use crate::ports::{NotificationLevel, Notifier, RenderHooks, StateHandle};

/// Key the projections are stored under in the host's source map
pub const SOURCE_KEY: &str = "rotogrinders";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Sport has no projection file; nothing was fetched
    Skipped,
    Loaded { players: usize },
    /// Fetch failed or returned an empty payload; state untouched
    Failed,
}

/// Pulls the current sport's projection file into host state and drives the
/// host's recompute/render pipeline.
#[derive(Clone)]
pub struct DataLoader {
    store: Arc<dyn DataStore>,
    hooks: Arc<dyn RenderHooks>,
    notifier: Arc<dyn Notifier>,
}

impl DataLoader {
    pub fn new(
        store: Arc<dyn DataStore>,
        hooks: Arc<dyn RenderHooks>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        DataLoader {
            store,
            hooks,
            notifier,
        }
    }

    pub async fn auto_load(&self, state: &dyn StateHandle) -> LoadOutcome {
        info!("🔄 Loading Rotogrinders data from {}...", self.store.name());

        let code = state.sport();
        let sport = match Sport::from_code(&code) {
            Some(s) => s,
            None => {
                info!("Unknown sport '{}', skipping auto-load", code);
                return LoadOutcome::Skipped;
            }
        };

        // Null, scalars and empty collections all count as "no data"
        let payload = self
            .store
            .fetch(sport.data_file())
            .await
            .filter(|data| player_count(data) > 0);

        match payload {
            Some(data) => {
                let players = player_count(&data);
                state.insert_source(SOURCE_KEY, data);
                info!("✅ Loaded Rotogrinders {} data: {} players", sport, players);

                self.hooks.update_sources();
                self.hooks.aggregate_data();
                self.hooks.render();

                self.notifier.notify(
                    &format!("✓ Auto-loaded Rotogrinders: {} players", players),
                    NotificationLevel::Success,
                );
                LoadOutcome::Loaded { players }
            }
            None => {
                warn!("⚠️ No Rotogrinders data found or error loading");
                self.notifier.notify(
                    "⚠️ Could not auto-load Rotogrinders data",
                    NotificationLevel::Warning,
                );
                LoadOutcome::Failed
            }
        }
    }

    /// Manual refresh: announce, then run the full load.
    ///
    /// Concurrent refreshes are not serialized; whichever finishes last owns
    /// the state entry.
    pub async fn refresh(&self, state: &dyn StateHandle) -> LoadOutcome {
        self.notifier
            .notify("🔄 Refreshing Rotogrinders data...", NotificationLevel::Info);
        self.auto_load(state).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::SharedState;
    use async_trait::async_trait;
    use chrono::{DateTime, Utc};
    use serde_json::json;
    use std::sync::Mutex;

    /// Ordered record of hook and notifier calls.
    #[derive(Clone, Default)]
    struct CallLog(Arc<Mutex<Vec<String>>>);

    impl CallLog {
        fn push(&self, entry: String) {
            self.0.lock().unwrap().push(entry);
        }

        fn entries(&self) -> Vec<String> {
            self.0.lock().unwrap().clone()
        }
    }

    #[derive(Default)]
    struct FakeStore {
        payload: Option<serde_json::Value>,
        fetched: Mutex<Vec<String>>,
    }

    impl FakeStore {
        fn with_payload(payload: serde_json::Value) -> Self {
            FakeStore {
                payload: Some(payload),
                ..FakeStore::default()
            }
        }

        fn fetched_files(&self) -> Vec<String> {
            self.fetched.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl DataStore for FakeStore {
        fn name(&self) -> &str {
            "fake"
        }

        async fn fetch(&self, filename: &str) -> Option<serde_json::Value> {
            self.fetched.lock().unwrap().push(filename.to_string());
            self.payload.clone()
        }

        async fn last_update_time(&self) -> Option<DateTime<Utc>> {
            None
        }
    }

    struct RecordingHooks(CallLog);

    impl RenderHooks for RecordingHooks {
        fn update_sources(&self) {
            self.0.push("update_sources".into());
        }

        fn aggregate_data(&self) {
            self.0.push("aggregate_data".into());
        }

        fn render(&self) {
            self.0.push("render".into());
        }
    }

    struct RecordingNotifier {
        log: CallLog,
        messages: Mutex<Vec<(String, NotificationLevel)>>,
    }

    impl RecordingNotifier {
        fn messages(&self) -> Vec<(String, NotificationLevel)> {
            self.messages.lock().unwrap().clone()
        }
    }

    impl Notifier for RecordingNotifier {
        fn notify(&self, message: &str, level: NotificationLevel) {
            self.log.push(format!("notify:{:?}:{}", level, message));
            self.messages
                .lock()
                .unwrap()
                .push((message.to_string(), level));
        }
    }

    fn loader(store: Arc<FakeStore>, log: &CallLog) -> (DataLoader, Arc<RecordingNotifier>) {
        let notifier = Arc::new(RecordingNotifier {
            log: log.clone(),
            messages: Mutex::new(Vec::new()),
        });
        let loader = DataLoader::new(
            store,
            Arc::new(RecordingHooks(log.clone())),
            notifier.clone(),
        );
        (loader, notifier)
    }

    #[tokio::test]
    async fn test_unknown_sport_skips_without_fetching() {
        for code in ["mlb", "", "NBA", "soccer"] {
            let log = CallLog::default();
            let store = Arc::new(FakeStore::with_payload(json!({"a": 1})));
            let (loader, notifier) = loader(store.clone(), &log);
            let state = SharedState::new(code);
            state.insert_source(SOURCE_KEY, json!({"old": true}));

            assert_eq!(loader.auto_load(&state).await, LoadOutcome::Skipped);
            assert!(store.fetched_files().is_empty());
            assert!(notifier.messages().is_empty());
            assert_eq!(state.source(SOURCE_KEY), Some(json!({"old": true})));
        }
    }

    #[tokio::test]
    async fn test_each_sport_fetches_its_file_once() {
        for (code, file) in [
            ("nba", "rotogrinders_nba.json"),
            ("nfl", "rotogrinders_nfl.json"),
            ("nhl", "rotogrinders_nhl.json"),
        ] {
            let log = CallLog::default();
            let store = Arc::new(FakeStore::with_payload(json!({"p1": {}})));
            let (loader, _) = loader(store.clone(), &log);
            loader.auto_load(&SharedState::new(code)).await;
            assert_eq!(store.fetched_files(), vec![file.to_string()]);
        }
    }

    #[tokio::test]
    async fn test_success_writes_state_then_hooks_in_order() {
        let log = CallLog::default();
        let store = Arc::new(FakeStore::with_payload(json!({"a": 1, "b": 2})));
        let (loader, notifier) = loader(store, &log);
        let state = SharedState::new("nba");

        let outcome = loader.auto_load(&state).await;

        assert_eq!(outcome, LoadOutcome::Loaded { players: 2 });
        assert_eq!(state.source(SOURCE_KEY), Some(json!({"a": 1, "b": 2})));
        assert_eq!(
            log.entries(),
            vec![
                "update_sources",
                "aggregate_data",
                "render",
                "notify:Success:✓ Auto-loaded Rotogrinders: 2 players",
            ]
        );
        assert!(notifier.messages()[0].0.contains('2'));
    }

    #[tokio::test]
    async fn test_empty_object_is_failure() {
        let log = CallLog::default();
        let store = Arc::new(FakeStore::with_payload(json!({})));
        let (loader, notifier) = loader(store, &log);
        let state = SharedState::new("nfl");
        state.insert_source(SOURCE_KEY, json!({"prior": 1}));

        assert_eq!(loader.auto_load(&state).await, LoadOutcome::Failed);
        assert_eq!(state.source(SOURCE_KEY), Some(json!({"prior": 1})));
        assert_eq!(
            notifier.messages(),
            vec![(
                "⚠️ Could not auto-load Rotogrinders data".to_string(),
                NotificationLevel::Warning
            )]
        );
        assert_eq!(log.entries().len(), 1, "no hooks may run on failure");
    }

    #[tokio::test]
    async fn test_fetch_failure_leaves_state_untouched() {
        for payload in [None, Some(json!(null))] {
            let log = CallLog::default();
            let store = Arc::new(FakeStore {
                payload,
                ..FakeStore::default()
            });
            let (loader, notifier) = loader(store, &log);
            let state = SharedState::new("nhl");

            assert_eq!(loader.auto_load(&state).await, LoadOutcome::Failed);
            assert!(state.source(SOURCE_KEY).is_none());
            assert_eq!(notifier.messages()[0].1, NotificationLevel::Warning);
        }
    }

    #[tokio::test]
    async fn test_refresh_announces_then_loads() {
        let log = CallLog::default();
        let store = Arc::new(FakeStore::with_payload(json!({"a": 1})));
        let (loader, _) = loader(store.clone(), &log);
        let state = SharedState::new("nba");

        assert_eq!(loader.refresh(&state).await, LoadOutcome::Loaded { players: 1 });
        let entries = log.entries();
        assert_eq!(entries[0], "notify:Info:🔄 Refreshing Rotogrinders data...");
        assert_eq!(entries.len(), 5);
        assert_eq!(store.fetched_files().len(), 1);
    }

    #[tokio::test]
    async fn test_refresh_on_unknown_sport_still_announces() {
        let log = CallLog::default();
        let store = Arc::new(FakeStore::with_payload(json!({"a": 1})));
        let (loader, notifier) = loader(store.clone(), &log);

        assert_eq!(
            loader.refresh(&SharedState::new("mlb")).await,
            LoadOutcome::Skipped
        );
        assert_eq!(notifier.messages().len(), 1);
        assert!(store.fetched_files().is_empty());
    }

    #[tokio::test]
    async fn test_empty_and_scalar_payloads_leave_state_untouched() {
        for payload in [json!([]), json!(""), json!(false), json!(0), json!("abc"), json!(12)] {
            let log = CallLog::default();
            let store = Arc::new(FakeStore::with_payload(payload.clone()));
            let (loader, notifier) = loader(store, &log);
            let state = SharedState::new("nba");
            state.insert_source(SOURCE_KEY, json!({"prior": 1}));

            assert_eq!(loader.auto_load(&state).await, LoadOutcome::Failed, "{}", payload);
            assert_eq!(state.source(SOURCE_KEY), Some(json!({"prior": 1})));
            assert_eq!(
                log.entries(),
                vec!["notify:Warning:⚠️ Could not auto-load Rotogrinders data"],
                "no hooks may run for {}",
                payload
            );
            assert_eq!(notifier.messages()[0].1, NotificationLevel::Warning);
        }
    }

    #[tokio::test]
    async fn test_array_payload_counts_elements() {
        let log = CallLog::default();
        let store = Arc::new(FakeStore::with_payload(json!([{"name": "a"}, {"name": "b"}])));
        let (loader, _) = loader(store, &log);
        let state = SharedState::new("nfl");

        assert_eq!(loader.auto_load(&state).await, LoadOutcome::Loaded { players: 2 });
        assert_eq!(state.source(SOURCE_KEY), Some(json!([{"name": "a"}, {"name": "b"}])));
    }
}
