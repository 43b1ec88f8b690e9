//! Browser-facing routes: the root entry, the login surface, and the
//! gated application.

use axum::extract::State;
use axum::response::Response;
use axum::routing::get;
use axum::{middleware, Extension, Json, Router};
use gatehouse_core::dispatcher::{RootDispatcher, RootView};
use gatehouse_core::navigation::ROOT_PATH;
use gatehouse_core::types::UserIdentity;

use crate::middleware::guard::require_session;
use crate::middleware::session::RequestSession;
use crate::pages;
use crate::response::DataResponse;
use crate::state::AppState;

/// Mount page routes.
///
/// ```text
/// /              GET   root dispatcher (public landing)
/// /login         GET   login surface
/// /app           GET   dashboard            (guarded)
/// /app/profile   GET   current identity     (guarded)
/// ```
pub fn router(state: AppState) -> Router<AppState> {
    let login_path = state.config.login_path.clone();

    let protected = Router::new()
        .route("/app", get(dashboard))
        .route("/app/profile", get(profile))
        .route_layer(middleware::from_fn_with_state(state, require_session));

    Router::new()
        .route(ROOT_PATH, get(root))
        .route(&login_path, get(login))
        .merge(protected)
}

/// GET /
///
/// Everyone sees the landing once the session settles; the session only
/// decides when, never what.
async fn root(State(state): State<AppState>, session: RequestSession) -> Response {
    let mut dispatcher = RootDispatcher::new(session.store.subscribe());
    let resolved = tokio::time::timeout(state.config.render_wait, dispatcher.resolve()).await;
    let view = resolved.unwrap_or_else(|_| dispatcher.view());

    match view {
        RootView::Loading => pages::loading(),
        RootView::Landing => pages::landing(),
    }
}

async fn login() -> Response {
    pages::login()
}

/// GET /app
async fn dashboard(Extension(user): Extension<UserIdentity>) -> Response {
    tracing::debug!(user_id = %user.id, "Rendering dashboard");
    pages::dashboard(user.email.as_deref())
}

/// GET /app/profile
async fn profile(Extension(user): Extension<UserIdentity>) -> Json<DataResponse<UserIdentity>> {
    Json(DataResponse { data: user })
}
