//! Session Store: the single source of truth for "who is signed in".
//!
//! A [`SessionStore`] starts unsettled and issues exactly one identity check
//! against its [`IdentityProvider`]. When the check completes (with a user,
//! without one, with an error, or by timing out) the store becomes settled.
//! Settlement is one-way: nothing moves a store back to unsettled.
//!
//! Consumers never poll; they subscribe through [`SessionStore::subscribe`]
//! and wait on the returned [`SettlementGate`]. The state lives in a
//! `tokio::sync::watch` channel so every subscriber observes the same value.
//!
//! Dropping the last handle (store or gate), or calling
//! [`SessionStore::teardown`], cancels an in-flight check so it never writes
//! to a store nobody observes.

use std::sync::{Arc, Weak};
use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use crate::gate::SettlementGate;
use crate::types::UserIdentity;

/// Default upper bound on the identity check.
pub const DEFAULT_SESSION_TIMEOUT: Duration = Duration::from_secs(10);

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// Snapshot of the authentication state.
///
/// Before settlement `user` is always `None`, which does not mean signed out.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Session {
    pub user: Option<UserIdentity>,
    pub is_settled: bool,
}

impl Session {
    pub fn unsettled() -> Self {
        Self::default()
    }

    pub fn settled(user: Option<UserIdentity>) -> Self {
        Self {
            user,
            is_settled: true,
        }
    }

    /// `true` only once settled with a user present.
    pub fn is_authenticated(&self) -> bool {
        self.is_settled && self.user.is_some()
    }
}

// ---------------------------------------------------------------------------
// Identity provider seam
// ---------------------------------------------------------------------------

/// Failure of an identity check. The store never surfaces these; they are
/// logged and treated as "no user".
#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    #[error("Identity request failed: {0}")]
    Transport(String),

    #[error("Identity provider returned {status}: {message}")]
    Rejected { status: u16, message: String },

    #[error("Invalid identity payload: {0}")]
    InvalidPayload(String),
}

/// Asynchronous "get current session" capability.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Resolve the current user, or `Ok(None)` when nobody is signed in.
    async fn current_user(&self) -> Result<Option<UserIdentity>, IdentityError>;
}

// ---------------------------------------------------------------------------
// SessionStore
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
pub struct SessionOptions {
    /// Bound on the identity check. On expiry the store settles with no
    /// user. `None` waits for the provider indefinitely.
    pub timeout: Option<Duration>,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            timeout: Some(DEFAULT_SESSION_TIMEOUT),
        }
    }
}

struct Inner {
    state: watch::Sender<Session>,
    cancel: CancellationToken,
}

impl Inner {
    /// Apply the result of the initial identity check. A store that was
    /// already settled by an auth change keeps its state.
    fn settle_from_check(&self, user: Option<UserIdentity>) {
        let signed_in = user.is_some();
        let applied = self.state.send_if_modified(|session| {
            if session.is_settled {
                return false;
            }
            *session = Session::settled(user);
            true
        });
        if applied {
            tracing::debug!(signed_in, "Session settled");
        }
    }
}

impl Drop for Inner {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

/// Cloneable handle to one session's state.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<Inner>,
}

impl SessionStore {
    /// Create an unsettled store and spawn its identity check.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn start(provider: Arc<dyn IdentityProvider>, options: SessionOptions) -> Self {
        let (state, _) = watch::channel(Session::unsettled());
        let cancel = CancellationToken::new();
        let inner = Arc::new(Inner {
            state,
            cancel: cancel.clone(),
        });

        tokio::spawn(run_check(
            provider,
            options.timeout,
            Arc::downgrade(&inner),
            cancel,
        ));

        Self { inner }
    }

    /// Current snapshot of the session.
    pub fn get_session(&self) -> Session {
        self.inner.state.borrow().clone()
    }

    /// Subscribe to state changes.
    pub fn subscribe(&self) -> SettlementGate {
        SettlementGate::new(self.clone(), self.inner.state.subscribe())
    }

    /// Push an identity change observed after construction (sign-in in
    /// another tab, token refresh). Settles the store if it was not yet.
    pub fn apply_auth_change(&self, user: Option<UserIdentity>) {
        let next = Session::settled(user);
        let changed = self.inner.state.send_if_modified(|session| {
            if *session == next {
                return false;
            }
            *session = next;
            true
        });
        if changed {
            tracing::debug!(
                signed_in = self.inner.state.borrow().user.is_some(),
                "Session changed"
            );
        }
    }

    /// Clear the current user. The store stays settled.
    pub fn sign_out(&self) {
        tracing::info!("Signing out");
        self.apply_auth_change(None);
    }

    /// Cancel the identity check if it is still in flight. An unsettled
    /// store stays unsettled afterwards.
    pub fn teardown(&self) {
        self.inner.cancel.cancel();
    }
}

async fn run_check(
    provider: Arc<dyn IdentityProvider>,
    timeout: Option<Duration>,
    store: Weak<Inner>,
    cancel: CancellationToken,
) {
    let user = tokio::select! {
        () = cancel.cancelled() => {
            tracing::debug!("Identity check cancelled before settlement");
            return;
        }
        user = resolve_identity(provider.as_ref(), timeout) => user,
    };

    if let Some(inner) = store.upgrade() {
        inner.settle_from_check(user);
    }
}

/// Run the provider call, normalizing every failure to "no user".
async fn resolve_identity(
    provider: &dyn IdentityProvider,
    timeout: Option<Duration>,
) -> Option<UserIdentity> {
    let check = provider.current_user();
    let result = match timeout {
        Some(limit) => match tokio::time::timeout(limit, check).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(
                    timeout_ms = limit.as_millis() as u64,
                    "Identity check timed out, treating as signed out"
                );
                return None;
            }
        },
        None => check.await,
    };

    match result {
        Ok(user) => user,
        Err(e) => {
            tracing::warn!(error = %e, "Identity check failed, treating as signed out");
            None
        }
    }
}
