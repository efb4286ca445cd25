//! Registry of session histories keyed by session id.

use std::collections::HashMap;
use std::sync::Arc;

use parley_common::SessionId;
use tokio::sync::{Mutex, RwLock};
use tracing::info;

use super::history::SessionHistory;

/// Shared handle to one session's history.
///
/// Every handle for the same id points at the same history; holding the
/// lock serializes appends and renders on that session.
pub type SessionHandle = Arc<Mutex<SessionHistory>>;

/// Maps session ids to their histories, creating them on first lookup.
///
/// Starts empty and lives as long as its owner; there is no removal.
/// Lookups of different ids only contend on the registry lock, never on
/// each other's histories.
#[derive(Debug, Default)]
pub struct HistoryStore {
    sessions: RwLock<HashMap<SessionId, SessionHandle>>,
}

impl HistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the history for `id`, registering an empty one if needed.
    pub async fn get_or_create(&self, id: &SessionId) -> SessionHandle {
        if let Some(handle) = self.sessions.read().await.get(id) {
            return Arc::clone(handle);
        }

        let mut sessions = self.sessions.write().await;
        let handle = sessions.entry(id.clone()).or_insert_with(|| {
            info!(session = %id, "created session history");
            Arc::new(Mutex::new(SessionHistory::new()))
        });
        Arc::clone(handle)
    }

    pub async fn contains(&self, id: &SessionId) -> bool {
        self.sessions.read().await.contains_key(id)
    }

    /// Number of sessions created so far.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }

    /// Sorted snapshot of known session ids.
    pub async fn session_ids(&self) -> Vec<SessionId> {
        let mut ids: Vec<SessionId> = self.sessions.read().await.keys().cloned().collect();
        ids.sort();
        ids
    }
}
