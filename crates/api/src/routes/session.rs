use axum::extract::State;
use axum::Json;
use gatehouse_core::session::Session;

use crate::middleware::session::RequestSession;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/session
///
/// Waits up to `render_wait` for settlement. A session that is still
/// unsettled after that is returned as-is (`is_settled: false`).
pub async fn get_session(
    State(state): State<AppState>,
    session: RequestSession,
) -> Json<DataResponse<Session>> {
    let mut gate = session.store.subscribe();
    let data = match gate.settled_within(state.config.render_wait).await {
        Some(settled) => settled,
        None => gate.current(),
    };
    Json(DataResponse { data })
}
