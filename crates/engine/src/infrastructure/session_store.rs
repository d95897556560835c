//! In-memory session table with per-session locking.

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use gamecraft_domain::{Session, SessionId};
use tokio::sync::Mutex;

use crate::infrastructure::ports::{ClockPort, SessionLease, SessionStore, StoreError};

/// Sessions live for the lifetime of the process.
///
/// The map itself is sharded, so lookups for different ids never wait on
/// each other. Each entry carries its own async mutex which serialises
/// turns for that id.
pub struct InMemorySessionStore {
    sessions: DashMap<SessionId, Arc<Mutex<Session>>>,
    clock: Arc<dyn ClockPort>,
}

impl InMemorySessionStore {
    pub fn new(clock: Arc<dyn ClockPort>) -> Self {
        Self {
            sessions: DashMap::new(),
            clock,
        }
    }

    fn slot(&self, id: &SessionId) -> Arc<Mutex<Session>> {
        // The shard guard is released at the end of this function, before any await.
        self.sessions
            .entry(id.clone())
            .or_insert_with(|| {
                tracing::debug!(session_id = %id, "Creating session");
                Arc::new(Mutex::new(Session::new(id.clone(), self.clock.now())))
            })
            .value()
            .clone()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get_or_create(&self, id: &SessionId) -> Result<SessionLease, StoreError> {
        Ok(self.slot(id).lock_owned().await)
    }

    async fn reset(&self, id: &SessionId) -> Result<SessionLease, StoreError> {
        let mut lease = self.slot(id).lock_owned().await;
        lease.reset(self.clock.now());
        Ok(lease)
    }

    async fn save(&self, lease: SessionLease) -> Result<(), StoreError> {
        // Mutations happen in place; releasing the guard publishes them.
        drop(lease);
        Ok(())
    }

    async fn count(&self) -> usize {
        self.sessions.len()
    }
}
