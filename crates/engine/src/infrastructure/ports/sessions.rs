//! Session store port.

use async_trait::async_trait;
use gamecraft_domain::{Session, SessionId};
use tokio::sync::OwnedMutexGuard;

use super::error::StoreError;

/// Exclusive access to one session. Other requests for the same id wait
/// until the lease is dropped or handed back through [`SessionStore::save`].
pub type SessionLease = OwnedMutexGuard<Session>;

/// Session table keyed by caller-supplied id.
///
/// Requests for different ids never contend. Holders must not keep a lease
/// across an await on an external collaborator.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Lock the session, creating it with defaults when the id is unseen.
    async fn get_or_create(&self, id: &SessionId) -> Result<SessionLease, StoreError>;

    /// Lock the session and put it back to its initial state.
    async fn reset(&self, id: &SessionId) -> Result<SessionLease, StoreError>;

    /// Commit the session and release the lease.
    async fn save(&self, lease: SessionLease) -> Result<(), StoreError>;

    async fn count(&self) -> usize;
}
