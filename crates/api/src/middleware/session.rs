//! Per-request Session Store extractor.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use gatehouse_core::session::SessionStore;

use crate::identity::access_token;
use crate::state::AppState;

/// The session store for the current request.
///
/// Extraction starts the identity check in the background; handlers decide
/// how long to wait for it. When the request finishes the store is dropped,
/// cancelling a check that is still in flight.
///
/// ```ignore
/// async fn handler(session: RequestSession) -> Json<Session> {
///     Json(session.store.subscribe().settled().await)
/// }
/// ```
pub struct RequestSession {
    pub store: SessionStore,
}

impl FromRequestParts<AppState> for RequestSession {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = access_token(&parts.headers);
        tracing::debug!(has_token = token.is_some(), "Starting session check");

        let provider = state.identity.provider_for(token);
        let store = SessionStore::start(provider, state.config.session_options());
        Ok(RequestSession { store })
    }
}
