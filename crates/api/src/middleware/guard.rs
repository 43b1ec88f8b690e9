//! Protected-route guard middleware.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect as HttpRedirect, Response};
use gatehouse_core::guard::{GuardState, GuardView, ProtectedRouteGuard};
use gatehouse_core::navigation::Redirect;

use super::session::RequestSession;
use crate::pages;
use crate::state::AppState;

/// Gate the wrapped routes behind a settled session with a user.
///
/// - still loading after `render_wait` -> loading placeholder
/// - no user -> redirect to the login path
/// - user -> the inner handler runs with the [`UserIdentity`] in the request
///   extensions
///
/// [`UserIdentity`]: gatehouse_core::types::UserIdentity
pub async fn require_session(
    State(state): State<AppState>,
    session: RequestSession,
    mut request: Request,
    next: Next,
) -> Response {
    let mut guard = ProtectedRouteGuard::new(session.store.subscribe(), &state.config.login_path);
    if tokio::time::timeout(state.config.render_wait, guard.resolve())
        .await
        .is_err()
    {
        tracing::debug!(path = %request.uri().path(), "Session still loading, rendering placeholder");
    }

    if let GuardState::Authorized(user) = guard.state() {
        request.extensions_mut().insert(user.clone());
    }

    match guard.render(next) {
        GuardView::Loading => pages::loading(),
        GuardView::Redirect(redirect) => redirect_response(&redirect),
        GuardView::Children(next) => next.run(request).await,
    }
}

/// An HTTP redirect never leaves the guarded URL in the browser history,
/// which is what a replacing navigation asks for. Pushing navigations use a
/// temporary redirect.
fn redirect_response(redirect: &Redirect) -> Response {
    if redirect.replace {
        HttpRedirect::to(&redirect.to).into_response()
    } else {
        HttpRedirect::temporary(&redirect.to).into_response()
    }
}
