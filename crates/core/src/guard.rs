//! Protected-route guard.
//!
//! States: `Loading`, `Authorized`, `Redirecting`. A guard leaves `Loading`
//! exactly once per mount; after that only a store change (via
//! [`ProtectedRouteGuard::next_change`]) or a new guard re-evaluates it.

use crate::gate::SettlementGate;
use crate::navigation::Redirect;
use crate::session::Session;
use crate::types::UserIdentity;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardState {
    Loading,
    Authorized(UserIdentity),
    Redirecting(Redirect),
}

impl GuardState {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, GuardState::Loading)
    }
}

/// What a guarded subtree renders as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardView<C> {
    Loading,
    Children(C),
    Redirect(Redirect),
}

pub struct ProtectedRouteGuard {
    gate: SettlementGate,
    login_path: String,
    state: GuardState,
}

impl ProtectedRouteGuard {
    pub fn new(gate: SettlementGate, login_path: impl Into<String>) -> Self {
        let login_path = login_path.into();
        let state = Self::evaluate(&gate.current(), &login_path);
        Self {
            gate,
            login_path,
            state,
        }
    }

    /// Pure state decision for a session snapshot.
    pub fn evaluate(session: &Session, login_path: &str) -> GuardState {
        if !session.is_settled {
            return GuardState::Loading;
        }
        match &session.user {
            Some(user) => GuardState::Authorized(user.clone()),
            None => GuardState::Redirecting(Redirect::replace(login_path)),
        }
    }

    pub fn state(&self) -> &GuardState {
        &self.state
    }

    /// Non-blocking re-check while still loading. Terminal states stay put.
    pub fn poll(&mut self) -> &GuardState {
        if !self.state.is_terminal() {
            self.state = Self::evaluate(&self.gate.current(), &self.login_path);
        }
        &self.state
    }

    /// Wait for settlement and leave `Loading`. Terminal states stay put.
    pub async fn resolve(&mut self) -> &GuardState {
        if !self.state.is_terminal() {
            let session = self.gate.settled().await;
            self.state = Self::evaluate(&session, &self.login_path);
            match &self.state {
                GuardState::Authorized(user) => {
                    tracing::debug!(user_id = %user.id, "Guard authorized");
                }
                GuardState::Redirecting(redirect) => {
                    tracing::debug!(to = %redirect.to, "Guard redirecting to login");
                }
                GuardState::Loading => {}
            }
        }
        &self.state
    }

    /// Wait for the next store change and re-evaluate from scratch.
    pub async fn next_change(&mut self) -> &GuardState {
        let session = self.gate.changed().await;
        self.state = Self::evaluate(&session, &self.login_path);
        &self.state
    }

    /// Render the guarded subtree for the current state. Children pass
    /// through unmodified when authorized.
    pub fn render<C>(&self, children: C) -> GuardView<C> {
        match &self.state {
            GuardState::Loading => GuardView::Loading,
            GuardState::Authorized(_) => GuardView::Children(children),
            GuardState::Redirecting(redirect) => GuardView::Redirect(redirect.clone()),
        }
    }
}
