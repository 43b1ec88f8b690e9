use std::sync::Arc;

use crate::config::ServerConfig;
use crate::identity::IdentityBackend;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Resolves request access tokens to identities.
    pub identity: Arc<dyn IdentityBackend>,
}
