//! Host application collaborators, injected into the loader and reporter.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

/// Mutable application state owned by the host.
pub trait StateHandle: Send + Sync {
    /// Currently selected sport code, e.g. `"nba"`.
    fn sport(&self) -> String;

    /// Replace the payload stored under `name`.
    fn insert_source(&self, name: &str, payload: serde_json::Value);
}

/// Recompute/render pipeline run after new data lands in state.
pub trait RenderHooks: Send + Sync {
    fn update_sources(&self);
    fn aggregate_data(&self);
    fn render(&self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Info,
    Warning,
}

/// User-facing notification toast.
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str, level: NotificationLevel);
}

/// Text elements addressable by id.
pub trait DisplaySurface: Send + Sync {
    /// Set the text of `element_id`. Returns false when no such element exists.
    fn set_text(&self, element_id: &str, text: &str) -> bool;
}

#[derive(Debug, Default)]
pub struct StateInner {
    pub sport: String,
    pub sources: BTreeMap<String, serde_json::Value>,
}

/// In-process `StateHandle` shared between the loader and render hooks.
#[derive(Clone, Default)]
pub struct SharedState {
    inner: Arc<Mutex<StateInner>>,
}

impl SharedState {
    pub fn new(sport: &str) -> Self {
        SharedState {
            inner: Arc::new(Mutex::new(StateInner {
                sport: sport.to_string(),
                sources: BTreeMap::new(),
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, StateInner> {
        // A panicking hook must not wedge the state for everyone else
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    #[cfg(test)]
    pub fn source(&self, name: &str) -> Option<serde_json::Value> {
        self.lock().sources.get(name).cloned()
    }

    /// Snapshot of every loaded source as a JSON object.
    pub fn sources_json(&self) -> serde_json::Value {
        let inner = self.lock();
        serde_json::Value::Object(
            inner
                .sources
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        )
    }
}

impl StateHandle for SharedState {
    fn sport(&self) -> String {
        self.lock().sport.clone()
    }

    fn insert_source(&self, name: &str, payload: serde_json::Value) {
        self.lock().sources.insert(name.to_string(), payload);
    }
}
