//! Index of logged-in sessions by player UUID.

use std::sync::Arc;

use dashmap::DashMap;
use mc_rs_proto::types::Uuid;
use tracing::debug;

use super::SessionHandle;

/// Concurrent map from player UUID to session handle.
///
/// Sessions register once the backend accepts their profile and remove
/// themselves on disconnect. Cloning shares the same map.
#[derive(Clone, Default)]
pub struct SessionManager {
    sessions: Arc<DashMap<Uuid, SessionHandle>>,
}

impl SessionManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a session. Returns the handle it replaced, if the same
    /// player was already connected.
    pub fn add(&self, uuid: Uuid, handle: SessionHandle) -> Option<SessionHandle> {
        debug!("Registering session {} for {uuid}", handle.id());
        self.sessions.insert(uuid, handle)
    }

    /// Remove `uuid`, but only if it still maps to session `id`.
    pub fn remove(&self, uuid: &Uuid, id: u64) -> bool {
        self.sessions
            .remove_if(uuid, |_, handle| handle.id() == id)
            .is_some()
    }

    pub fn get(&self, uuid: &Uuid) -> Option<SessionHandle> {
        self.sessions.get(uuid).map(|entry| entry.value().clone())
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub fn handles(&self) -> Vec<SessionHandle> {
        self.sessions
            .iter()
            .map(|entry| entry.value().clone())
            .collect()
    }
}
