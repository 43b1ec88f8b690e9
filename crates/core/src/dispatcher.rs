//! Root entry decision.
//!
//! The entry route shows the same public landing (the chat UI) to everyone
//! once the session has settled. Authentication state does not branch here;
//! signed-in and anonymous visitors get an identical entry experience.

use crate::gate::SettlementGate;
use crate::session::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootView {
    /// Full-screen loading placeholder.
    Loading,
    /// Public landing surface.
    Landing,
}

pub struct RootDispatcher {
    gate: SettlementGate,
}

impl RootDispatcher {
    pub fn new(gate: SettlementGate) -> Self {
        Self { gate }
    }

    /// Pure render decision for a session snapshot.
    pub fn render(session: &Session) -> RootView {
        if session.is_settled {
            RootView::Landing
        } else {
            RootView::Loading
        }
    }

    /// What to show right now.
    pub fn view(&self) -> RootView {
        Self::render(&self.gate.current())
    }

    /// Wait for settlement, then decide.
    pub async fn resolve(&mut self) -> RootView {
        Self::render(&self.gate.settled().await)
    }
}
