pub mod health;
pub mod pages;
pub mod session;

use axum::http::Uri;
use axum::routing::get;
use axum::Router;
use gatehouse_core::error::CoreError;

use crate::error::AppError;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /session      GET   current session once settled
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().route("/session", get(session::get_session))
}

/// Fallback for unmatched paths: JSON 404.
pub async fn not_found(uri: Uri) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "route",
        key: uri.path().to_string(),
    })
}
