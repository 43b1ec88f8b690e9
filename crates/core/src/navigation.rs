//! Client-side navigation primitive.

use serde::Serialize;

/// Public landing route handled by the root dispatcher.
pub const ROOT_PATH: &str = "/";

/// Default login route targeted by the protected-route guard.
pub const LOGIN_PATH: &str = "/login";

/// A navigation request: target path plus whether it replaces the current
/// history entry instead of pushing a new one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Redirect {
    pub to: String,
    pub replace: bool,
}

impl Redirect {
    /// Navigate without leaving the current entry in history.
    pub fn replace(to: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            replace: true,
        }
    }
}
