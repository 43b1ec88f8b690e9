//! Wait-for-settlement primitive shared by every session consumer.

use std::time::Duration;

use tokio::sync::watch;

use crate::session::{Session, SessionStore};

/// A subscription to a [`SessionStore`].
///
/// Holding a gate keeps the store alive, so the underlying channel cannot
/// close while the gate exists.
pub struct SettlementGate {
    _store: SessionStore,
    rx: watch::Receiver<Session>,
}

impl SettlementGate {
    pub(crate) fn new(store: SessionStore, rx: watch::Receiver<Session>) -> Self {
        Self { _store: store, rx }
    }

    /// Current snapshot, settled or not.
    pub fn current(&self) -> Session {
        self.rx.borrow().clone()
    }

    /// The settled session, or `None` while the check is still pending.
    pub fn try_settled(&self) -> Option<Session> {
        let session = self.rx.borrow();
        session.is_settled.then(|| session.clone())
    }

    /// Wait until the store is settled and return the settled session.
    pub async fn settled(&mut self) -> Session {
        if let Ok(session) = self.rx.wait_for(|s| s.is_settled).await {
            return session.clone();
        }
        self.current()
    }

    /// Like [`settled`](Self::settled) but gives up after `limit`,
    /// returning `None` if the store is still unsettled.
    pub async fn settled_within(&mut self, limit: Duration) -> Option<Session> {
        tokio::time::timeout(limit, self.settled()).await.ok()
    }

    /// Wait for the next change to the store and return the new state.
    pub async fn changed(&mut self) -> Session {
        if self.rx.changed().await.is_ok() {
            return self.rx.borrow_and_update().clone();
        }
        self.current()
    }
}
